//! Per-call timing of the inversion chains.
//!
//! Samples are taken by reading a timer once before the first call and once after each call,
//! then differencing consecutive readings, so timer overhead is charged to every sample
//! equally. An empty-closure [`Probe::baseline`] measures that overhead.

use crate::{Modulus, U256};
use core::{fmt, hint::black_box};
use std::time::Instant;

/// What a [`TimingSource`] counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// Processor cycles.
    Cycles,
    /// Nanoseconds of monotonic wall-clock time.
    Nanoseconds,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeUnit::Cycles => "cycles",
            TimeUnit::Nanoseconds => "ns",
        })
    }
}

/// A monotonically increasing counter.
pub trait TimingSource {
    /// Current reading.
    fn now(&self) -> u64;

    /// What one tick of [`Self::now`] represents.
    fn unit(&self) -> TimeUnit;
}

/// The platform timer.
#[derive(Clone, Copy, Debug)]
pub enum Timer {
    /// The processor's cycle counter.
    Cycles,
    /// Nanoseconds since `origin`.
    Monotonic {
        /// Reference point for readings.
        origin: Instant,
    },
}

impl Timer {
    /// Prefer the hardware cycle counter, falling back to the monotonic clock.
    pub fn detect() -> Self {
        if read_cycles().is_some() {
            Timer::Cycles
        } else {
            log::warn!("no cycle counter on this platform; timing in nanoseconds");
            Self::monotonic()
        }
    }

    /// Monotonic nanosecond clock starting now.
    pub fn monotonic() -> Self {
        Timer::Monotonic {
            origin: Instant::now(),
        }
    }
}

impl TimingSource for Timer {
    fn now(&self) -> u64 {
        match self {
            Timer::Cycles => read_cycles().unwrap_or(0),
            Timer::Monotonic { origin } => {
                u64::try_from(origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
            }
        }
    }

    fn unit(&self) -> TimeUnit {
        match self {
            Timer::Cycles => TimeUnit::Cycles,
            Timer::Monotonic { .. } => TimeUnit::Nanoseconds,
        }
    }
}

#[cfg(target_arch = "x86_64")]
#[allow(unsafe_code, unused_unsafe)]
fn read_cycles() -> Option<u64> {
    // SAFETY: RDTSC is part of the x86_64 baseline and only reads the time-stamp counter.
    Some(unsafe { core::arch::x86_64::_rdtsc() })
}

#[cfg(not(target_arch = "x86_64"))]
fn read_cycles() -> Option<u64> {
    None
}

/// Takes a fixed number of back-to-back samples with a [`TimingSource`].
#[derive(Clone, Debug)]
pub struct Probe<T> {
    timer: T,
    iterations: usize,
}

impl<T: TimingSource> Probe<T> {
    /// A probe taking `iterations` samples per measurement.
    pub fn new(timer: T, iterations: usize) -> Self {
        Self { timer, iterations }
    }

    /// Time `iterations` consecutive calls of `f`.
    pub fn measure<F: FnMut()>(&self, mut f: F) -> Samples {
        let mut stamps = Vec::with_capacity(self.iterations + 1);
        stamps.push(self.timer.now());
        for _ in 0..self.iterations {
            f();
            stamps.push(self.timer.now());
        }

        let raw = stamps
            .windows(2)
            .map(|pair| pair[1].wrapping_sub(pair[0]))
            .collect();
        Samples::new(raw, self.timer.unit())
    }

    /// Time an empty closure, i.e. the cost of reading the timer.
    pub fn baseline(&self) -> Samples {
        self.measure(|| black_box(()))
    }
}

/// Per-call timings in call order and sorted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Samples {
    raw: Vec<u64>,
    sorted: Vec<u64>,
    unit: TimeUnit,
}

impl Samples {
    fn new(raw: Vec<u64>, unit: TimeUnit) -> Self {
        let mut sorted = raw.clone();
        sorted.sort_unstable();
        Self { raw, sorted, unit }
    }

    /// Timings in call order.
    pub fn raw(&self) -> &[u64] {
        &self.raw
    }

    /// Timings in ascending order.
    pub fn sorted(&self) -> &[u64] {
        &self.sorted
    }

    /// Unit of every timing.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Middle sorted timing, if any samples were taken.
    pub fn median(&self) -> Option<u64> {
        self.sorted.get(self.sorted.len() / 2).copied()
    }
}

impl fmt::Display for Samples {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.unit)?;
        for t in &self.raw {
            write!(f, " {t}")?;
        }
        f.write_str("\nsorted:")?;
        for t in &self.sorted {
            write!(f, " {t}")?;
        }
        Ok(())
    }
}

/// Timer overhead next to the cost of one inversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchReport {
    /// Empty-closure timings.
    pub baseline: Samples,
    /// Inversion timings.
    pub inversion: Samples,
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nothing")?;
        writeln!(f, "{}", self.baseline)?;
        writeln!(f, "inverse")?;
        write!(f, "{}", self.inversion)
    }
}

/// Time inversions modulo `modulus`, feeding each result into the next call.
pub fn probe_inversion<T: TimingSource>(
    probe: &Probe<T>,
    modulus: &Modulus,
    seed: &U256,
) -> BenchReport {
    let baseline = probe.baseline();
    let mut x = *seed;
    let inversion = probe.measure(|| x = modulus.invert(black_box(&x)));
    BenchReport {
        baseline,
        inversion,
    }
}

#[cfg(test)]
mod tests {
    use super::{Probe, TimeUnit, Timer, TimingSource, probe_inversion};
    use crate::{U256, modulus::P256_P};
    use core::cell::Cell;

    /// Advances by a fixed step on every reading.
    struct Ticker {
        now: Cell<u64>,
        step: u64,
    }

    impl TimingSource for Ticker {
        fn now(&self) -> u64 {
            let now = self.now.get();
            self.now.set(now + self.step);
            now
        }

        fn unit(&self) -> TimeUnit {
            TimeUnit::Cycles
        }
    }

    #[test]
    fn differences_consecutive_readings() {
        let probe = Probe::new(
            Ticker {
                now: Cell::new(100),
                step: 7,
            },
            5,
        );
        let samples = probe.baseline();
        assert_eq!(samples.raw(), [7; 5]);
        assert_eq!(samples.median(), Some(7));
        assert_eq!(samples.to_string(), "cycles: 7 7 7 7 7\nsorted: 7 7 7 7 7");
    }

    #[test]
    fn inversion_report() {
        let probe = Probe::new(Timer::monotonic(), 4);
        let report = probe_inversion(&probe, &P256_P, &U256::from_u64(3));
        assert_eq!(report.baseline.raw().len(), 4);
        assert_eq!(report.inversion.raw().len(), 4);
        assert_eq!(report.inversion.unit(), TimeUnit::Nanoseconds);
        assert!(report.inversion.sorted().is_sorted());
        assert!(report.to_string().starts_with("nothing\nns:"));
    }

    #[test]
    fn detected_timer_advances() {
        let timer = Timer::detect();
        let before = timer.now();
        let after = timer.now();
        assert!(after >= before);
    }
}
