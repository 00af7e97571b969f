use std::time::{Duration, Instant};

// A wait below one microsecond truncates to a zero timeval when armed on a
// socket, and a zero timeval disarms the read timeout entirely.
const MIN_WAIT: Duration = Duration::from_micros(1);

/// Budget left before a [`Deadline`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Remaining {
    Expired,
    Time(Duration),
}

/// A fixed absolute point in time.
///
/// Computed once from the probe start and the caller's timeout. Every wait
/// in the receive loop is bounded against this same point, never against a
/// fresh `now + timeout`.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Deadline {
    instant: Instant,
}

impl Deadline {
    pub(crate) fn starting_at(start: Instant, timeout: Duration) -> Self {
        Deadline {
            instant: start + timeout,
        }
    }

    /// Time left until the deadline, `Expired` once `now` has reached it.
    /// Clamps instead of going negative and never hands out a wait shorter
    /// than `MIN_WAIT`.
    pub(crate) fn remaining(&self, now: Instant) -> Remaining {
        match self.instant.checked_duration_since(now) {
            None => Remaining::Expired,
            Some(left) if left.is_zero() => Remaining::Expired,
            Some(left) => Remaining::Time(left.max(MIN_WAIT)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deadline_of_100ms() -> (Instant, Deadline) {
        let start = Instant::now();
        let deadline = Deadline::starting_at(start, Duration::from_millis(100));
        (start, deadline)
    }

    #[test]
    fn remaining_shrinks_as_time_passes() {
        let (start, deadline) = deadline_of_100ms();

        assert_eq!(
            Remaining::Time(Duration::from_millis(100)),
            deadline.remaining(start)
        );
        assert_eq!(
            Remaining::Time(Duration::from_millis(60)),
            deadline.remaining(start + Duration::from_millis(40))
        );
    }

    #[test]
    fn reaching_the_deadline_expires_it() {
        let (start, deadline) = deadline_of_100ms();

        assert_eq!(
            Remaining::Expired,
            deadline.remaining(start + Duration::from_millis(100))
        );
    }

    #[test]
    fn time_beyond_the_deadline_clamps_to_expired() {
        let (start, deadline) = deadline_of_100ms();

        assert_eq!(
            Remaining::Expired,
            deadline.remaining(start + Duration::from_secs(5))
        );
    }

    #[test]
    fn sub_millisecond_remainders_are_preserved() {
        let (start, deadline) = deadline_of_100ms();
        let just_before = start + Duration::new(0, 99_999_000);

        assert_eq!(
            Remaining::Time(Duration::new(0, 1_000)),
            deadline.remaining(just_before)
        );
    }

    #[test]
    fn never_hands_out_a_wait_below_one_microsecond() {
        let (start, deadline) = deadline_of_100ms();
        let inside_the_last_microsecond =
            start + Duration::from_millis(100) - Duration::from_nanos(500);

        assert_eq!(
            Remaining::Time(MIN_WAIT),
            deadline.remaining(inside_the_last_microsecond)
        );
    }

    #[test]
    fn querying_at_the_same_instant_is_stable() {
        let (start, deadline) = deadline_of_100ms();
        let now = start + Duration::from_millis(70);

        assert_eq!(deadline.remaining(now), deadline.remaining(now));
    }
}
