use super::with_rand08::Adapter;
use super::*;
use crate::{decode, time::reform_epoch, Variant};
use chrono::TimeDelta;

type ThreadGen = V6Generator<Adapter<rand::rngs::ThreadRng>, FixedTime>;

impl ThreadGen {
    fn for_testing() -> Self {
        V6Generator::with_rand_and_time_sources(
            Adapter(rand::thread_rng()),
            FixedTime(reform_epoch()),
        )
    }
}

/// An entropy source that returns the same bits forever.
struct ConstantSource(u64);

impl EntropySource for ConstantSource {
    fn next_u64(&mut self) -> Result<u64, Error> {
        Ok(self.0)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        dest.fill(self.0 as u8);
        Ok(())
    }
}

/// An entropy source that always fails.
struct FailingSource;

impl EntropySource for FailingSource {
    fn next_u64(&mut self) -> Result<u64, Error> {
        Err(Error::EntropySourceUnavailable)
    }

    fn fill_bytes(&mut self, _: &mut [u8]) -> Result<(), Error> {
        Err(Error::EntropySourceUnavailable)
    }
}

mod stateless {
    use super::*;
    use std::collections::HashSet;

    /// Generates the documented identifiers at and right after the reform epoch
    #[test]
    fn generates_the_documented_identifiers_at_and_right_after_the_reform_epoch() {
        let epoch = reform_epoch();
        let e = generate_seeded(&epoch, 0, 0).unwrap();
        assert_eq!(decode::extract_raw_timestamp(&e), 0);
        assert_eq!(decode::decode(&e), Ok(epoch));

        let next = epoch + TimeDelta::nanoseconds(100);
        let e = generate_seeded(&next, 0, 0).unwrap();
        assert_eq!(&e.encode() as &str, "00000000-0000-6001-8000-000000000000");
        assert_eq!(decode::extract_raw_timestamp(&e), 1);
        assert_eq!(decode::decode(&e), Ok(next));
    }

    /// Refuses instants before the reform epoch
    #[test]
    fn refuses_instants_before_the_reform_epoch() {
        let before = reform_epoch() - TimeDelta::nanoseconds(1);
        let mut rng = Adapter(rand::thread_rng());
        assert_eq!(generate(&before, &mut rng), Err(Error::OutOfRange));
        assert_eq!(generate_seeded(&before, 0, 0), Err(Error::OutOfRange));
    }

    /// Masks caller-supplied entropy to field widths
    #[test]
    fn masks_caller_supplied_entropy_to_field_widths() {
        let e = generate_seeded(&reform_epoch(), u16::MAX, u64::MAX).unwrap();
        assert_eq!(&e.encode() as &str, "00000000-0000-6000-bfff-ffffffffffff");
        assert_eq!(e.version(), Some(6));
    }

    /// Round-trips instants of whole-tick precision
    #[test]
    fn round_trips_instants_of_whole_tick_precision() {
        let mut rng = Adapter(rand::thread_rng());
        let mut t = reform_epoch();
        for step in [1i64, 7, 10_000_000, 864_000_000_000, 31_556_952_000_000_000] {
            t += TimeDelta::nanoseconds(step * 100);
            let e = generate(&t, &mut rng).unwrap();
            assert_eq!(decode::decode(&e), Ok(t));
            assert_eq!(e.version(), Some(6));
            assert_eq!(e.variant(), Variant::Var10);
        }

        let now = Utc::now();
        let e = generate(&now, &mut rng).unwrap();
        let decoded = decode::decode(&e).unwrap();
        assert!(decoded <= now && now - decoded < TimeDelta::nanoseconds(100));
    }

    /// Produces non-decreasing timestamps for increasing instants
    #[test]
    fn produces_non_decreasing_timestamps_for_increasing_instants() {
        let mut rng = Adapter(rand::thread_rng());
        let start = reform_epoch() + TimeDelta::days(160_000);
        let mut prev = 0;
        for i in 0..10_000 {
            let t = start + TimeDelta::nanoseconds(i * 37);
            let curr = decode::extract_raw_timestamp(&generate(&t, &mut rng).unwrap());
            assert!(prev <= curr);
            prev = curr;
        }
    }

    /// Generates 10k distinct identifiers at one fixed instant
    #[test]
    fn generates_10k_distinct_identifiers_at_one_fixed_instant() {
        let mut rng = Adapter(rand::thread_rng());
        let t = reform_epoch() + TimeDelta::days(160_000);
        let s: HashSet<Uuid> = (0..10_000)
            .map(|_| generate(&t, &mut rng).unwrap())
            .collect();
        assert_eq!(s.len(), 10_000);
        assert!(s.iter().all(|e| decode::decode(e) == Ok(t)));
    }

    /// Sets multicast bit of random node
    #[test]
    fn sets_multicast_bit_of_random_node() {
        let mut rng = ConstantSource(0);
        let e = generate(&reform_epoch(), &mut rng).unwrap();
        assert_eq!(&e.encode() as &str, "00000000-0000-6000-8000-010000000000");
    }

    /// Propagates entropy source failure
    #[test]
    fn propagates_entropy_source_failure() {
        assert_eq!(
            generate(&reform_epoch(), &mut FailingSource),
            Err(Error::EntropySourceUnavailable)
        );
    }
}

mod generate_or_reset {
    use super::*;

    /// Generates increasing UUIDs even with decreasing or constant timestamp
    #[test]
    fn generates_increasing_uuids_even_with_decreasing_or_constant_timestamp() {
        let ts = 0x0123_4567_89ab_cdeu64;
        let mut g = ThreadGen::for_testing();
        let mut prev = g.generate_or_reset_core(ts, 10_000).unwrap();
        assert_eq!(prev.gregorian_ticks(), ts);
        for i in 0..100_000u64 {
            let curr = g.generate_or_reset_core(ts - i.min(4_000), 10_000).unwrap();
            assert!(prev < curr);
            prev = curr;
        }
        assert!(prev.gregorian_ticks() >= ts);
    }

    /// Breaks increasing order of UUIDs if timestamp goes backwards a lot
    #[test]
    fn breaks_increasing_order_of_uuids_if_timestamp_goes_backwards_a_lot() {
        let ts = 0x0123_4567_89ab_cdeu64;
        let mut g = ThreadGen::for_testing();
        let mut prev = g.generate_or_reset_core(ts, 10_000).unwrap();
        assert_eq!(prev.gregorian_ticks(), ts);

        let mut curr = g.generate_or_reset_core(ts - 10_000, 10_000).unwrap();
        assert!(prev < curr);

        prev = curr;
        curr = g.generate_or_reset_core(ts - 10_001, 10_000).unwrap();
        assert!(prev > curr);
        assert_eq!(curr.gregorian_ticks(), ts - 10_001);

        prev = curr;
        curr = g.generate_or_reset_core(ts - 10_002, 10_000).unwrap();
        assert!(prev < curr);
    }

    /// Advances timestamp at clock sequence overflow
    #[test]
    fn advances_timestamp_at_clock_sequence_overflow() {
        let ts = 0x0123_4567_89ab_cdeu64;
        let mut g = V6Generator::with_rand_and_time_sources(
            ConstantSource(u64::MAX),
            FixedTime(reform_epoch()),
        );
        let prev = g.generate_or_reset_core(ts, 10_000).unwrap();
        assert_eq!(prev.clock_seq(), MAX_CLOCK_SEQ);

        let curr = g.generate_or_reset_core(ts, 10_000).unwrap();
        assert!(prev < curr);
        assert_eq!(curr.gregorian_ticks(), ts + 1);
        assert_eq!(curr.clock_seq(), MAX_CLOCK_SEQ);
    }

    /// Refuses to advance timestamp beyond 60 bits
    #[test]
    fn refuses_to_advance_timestamp_beyond_60_bits() {
        let mut g = V6Generator::with_rand_and_time_sources(
            ConstantSource(u64::MAX),
            FixedTime(reform_epoch()),
        );
        assert!(g.generate_or_reset_core(MAX_TICKS, 10_000).is_ok());
        assert_eq!(
            g.generate_or_reset_core(MAX_TICKS, 10_000),
            Err(Error::OutOfRange)
        );
        assert_eq!(
            g.generate_or_reset_core(MAX_TICKS + 1, 10_000),
            Err(Error::OutOfRange)
        );
    }
}

mod generate_or_abort {
    use super::*;

    /// Generates increasing UUIDs even with decreasing or constant timestamp
    #[test]
    fn generates_increasing_uuids_even_with_decreasing_or_constant_timestamp() {
        let ts = 0x0123_4567_89ab_cdeu64;
        let mut g = ThreadGen::for_testing();
        let mut prev = g.generate_or_abort_core(ts, 10_000).unwrap().unwrap();
        assert_eq!(prev.gregorian_ticks(), ts);
        for i in 0..100_000u64 {
            let curr = g
                .generate_or_abort_core(ts - i.min(4_000), 10_000)
                .unwrap()
                .unwrap();
            assert!(prev < curr);
            prev = curr;
        }
        assert!(prev.gregorian_ticks() >= ts);
    }

    /// Returns None if timestamp goes backwards a lot
    #[test]
    fn returns_none_if_timestamp_goes_backwards_a_lot() {
        let ts = 0x0123_4567_89ab_cdeu64;
        let mut g = ThreadGen::for_testing();
        let prev = g.generate_or_abort_core(ts, 10_000).unwrap().unwrap();
        assert_eq!(prev.gregorian_ticks(), ts);

        let mut curr = g.generate_or_abort_core(ts - 10_000, 10_000).unwrap();
        assert!(prev < curr.unwrap());

        curr = g.generate_or_abort_core(ts - 10_001, 10_000).unwrap();
        assert!(curr.is_none());

        curr = g.generate_or_abort_core(ts - 10_002, 10_000).unwrap();
        assert!(curr.is_none());
    }
}

mod time_source {
    use super::*;

    /// Reads instants from injected time source
    #[test]
    fn reads_instants_from_injected_time_source() {
        let mut t = reform_epoch();
        let clock = move || {
            t += TimeDelta::nanoseconds(100);
            t
        };
        let mut g =
            V6Generator::with_rand_and_time_sources(Adapter(rand::thread_rng()), clock);
        for expected in 1..=3 {
            assert_eq!(g.generate().unwrap().gregorian_ticks(), expected);
        }
    }

    /// Encodes fixed instant truncated to tick resolution
    #[test]
    fn encodes_fixed_instant_truncated_to_tick_resolution() {
        let t = reform_epoch() + TimeDelta::nanoseconds(12_345_678_999);
        let mut g =
            V6Generator::with_rand_and_time_sources(Adapter(rand::thread_rng()), FixedTime(t));
        let e = g.generate_or_abort().unwrap().unwrap();
        assert_eq!(e.gregorian_ticks(), 123_456_789);
        assert_eq!(
            decode::decode(&e),
            Ok(reform_epoch() + TimeDelta::nanoseconds(12_345_678_900))
        );
    }

    /// Fails when time source precedes the reform epoch
    #[test]
    fn fails_when_time_source_precedes_the_reform_epoch() {
        let t = reform_epoch() - TimeDelta::nanoseconds(1);
        let mut g =
            V6Generator::with_rand_and_time_sources(Adapter(rand::thread_rng()), FixedTime(t));
        assert_eq!(g.generate(), Err(Error::OutOfRange));
        assert_eq!(g.generate_or_abort(), Err(Error::OutOfRange));
    }

    /// Encodes up-to-date timestamp
    #[test]
    fn encodes_up_to_date_timestamp() {
        let mut g = V6Generator::with_rand08(rand::thread_rng());
        for _ in 0..10_000 {
            let now = Utc::now();
            let decoded = decode::decode(&g.generate().unwrap()).unwrap();
            assert!((decoded - now).abs() < TimeDelta::milliseconds(16));
        }
    }
}

mod other_versions {
    use super::*;

    /// Propagates entropy source failure from every generator
    #[test]
    fn propagates_entropy_source_failure_from_every_generator() {
        let mut g6 =
            V6Generator::with_rand_and_time_sources(FailingSource, FixedTime(reform_epoch()));
        assert_eq!(g6.generate(), Err(Error::EntropySourceUnavailable));

        let mut g1 =
            V1Generator::with_rand_and_time_sources(FailingSource, FixedTime(reform_epoch()));
        assert_eq!(g1.generate(), Err(Error::EntropySourceUnavailable));

        let mut g4 = V4Generator::new(FailingSource);
        assert_eq!(g4.generate(), Err(Error::EntropySourceUnavailable));
    }

    /// Generates UUIDv1 carrying the time source instant
    #[test]
    fn generates_uuidv1_carrying_the_time_source_instant() {
        let t = reform_epoch() + TimeDelta::seconds(1_645_557_742 + 12_219_292_800);
        let mut g =
            V1Generator::with_rand_and_time_sources(Adapter(rand::thread_rng()), FixedTime(t));
        let e = g.generate().unwrap();
        assert_eq!(e.version(), Some(1));
        assert_eq!(e.variant(), Variant::Var10);
        assert_eq!(e.timestamp_ticks(), Some(0x1ec9414c232ab00));
        assert!(e.encode().starts_with("c232ab00-9414-11ec-"));
    }

    /// Generates UUIDv4 with constant bits set
    #[test]
    fn generates_uuidv4_with_constant_bits_set() {
        let mut g = V4Generator::new(ConstantSource(u64::MAX));
        assert_eq!(
            &g.generate().unwrap().encode() as &str,
            "ffffffff-ffff-4fff-bfff-ffffffffffff"
        );

        let mut g = V4Generator::with_rand08(rand::thread_rng());
        for _ in 0..1_000 {
            let e = g.generate().unwrap();
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(4));
            assert_eq!(e.timestamp_ticks(), None);
        }
    }

    /// Works as infinite iterator of increasing UUIDs
    #[test]
    fn works_as_infinite_iterator_of_increasing_uuids() {
        let g = V6Generator::with_rand08(rand::thread_rng());
        let samples: Vec<Uuid> = g.take(1_000).collect::<Result<_, _>>().unwrap();
        assert!(samples.windows(2).all(|w| w[0] < w[1]));
    }
}
