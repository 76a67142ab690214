use hitcomb_algorithms::{
    combine_event, combine_events, CombinerConfig, DuplicatePolicy, EventHits, HitCombiner,
};
use hitcomb_core::geometry::{DetId, GlobalPoint, LocalPoint, Placement, PlacementTable};
use hitcomb_core::hit::{RecHit, RecHitCollection, RecHitRef, SimHit};
use hitcomb_core::{Combination, Error};
use std::f64::consts::FRAC_PI_2;

const DET: DetId = DetId(1);

/// One event on a single unrotated detector element at the origin, so local
/// and global coordinates coincide.
#[derive(Default)]
struct Event {
    sim_hits: Vec<SimHit>,
    sim_to_rec: Vec<Option<RecHitRef>>,
    rec_hits: RecHitCollection,
}

impl Event {
    /// Adds a sim hit with a rec hit reconstructed exactly at its position.
    fn hit(&mut self, track_id: u32, x: f64, y: f64, z: f64) -> RecHitRef {
        let rec = self
            .rec_hits
            .push(RecHit::new(DET, GlobalPoint::new(x, y, z)))
            .unwrap();
        self.sim_hits
            .push(SimHit::new(track_id, LocalPoint::new(x, y, z), DET));
        self.sim_to_rec.push(Some(rec));
        rec
    }

    /// Adds a sim hit that produced no rec hit.
    fn lost(&mut self, track_id: u32, x: f64, y: f64, z: f64) {
        self.sim_hits
            .push(SimHit::new(track_id, LocalPoint::new(x, y, z), DET));
        self.sim_to_rec.push(None);
    }

    fn view(&self) -> EventHits<'_> {
        EventHits {
            sim_hits: &self.sim_hits,
            sim_to_rec: &self.sim_to_rec,
            rec_hits: &self.rec_hits,
        }
    }
}

fn geometry() -> PlacementTable {
    PlacementTable::new().with_placement(DET, Placement::default())
}

fn combine(event: &Event, config: CombinerConfig) -> Vec<Combination> {
    combine_event(&HitCombiner::new(config), event.view(), &geometry()).unwrap()
}

fn refs(combination: &Combination) -> Vec<RecHitRef> {
    combination.iter().copied().collect()
}

#[test]
fn test_nearby_hit_of_other_track_is_attached() {
    let mut event = Event::default();
    let a = event.hit(1, 0.0, 0.0, 0.0);
    let b = event.hit(1, 1.0, 0.0, 0.0);
    let c = event.hit(2, 0.0, 0.0, 0.05);

    let output = combine(&event, CombinerConfig::new().with_min_hits(1));

    assert_eq!(output.len(), 2);
    // The fake is attached right after the true hit of the sim hit that matched it.
    assert_eq!(refs(&output[0]), vec![a, c, b]);
    assert_eq!(refs(&output[1]), vec![c]);
}

#[test]
fn test_lost_single_hit_is_dropped() {
    let mut event = Event::default();
    event.lost(1, 0.0, 0.0, 0.0);

    let output = combine(&event, CombinerConfig::new().with_min_hits(1));
    assert!(output.is_empty());
}

#[test]
fn test_distant_tracks_stay_separate() {
    let mut event = Event::default();
    let a = event.hit(1, 0.0, 0.0, 0.0);
    let b = event.hit(2, 5.0, 0.0, 0.0);

    let output = combine(&event, CombinerConfig::new().with_min_hits(1));

    assert_eq!(output.len(), 2);
    assert_eq!(refs(&output[0]), vec![a]);
    assert_eq!(refs(&output[1]), vec![b]);
}

#[test]
fn test_zero_threshold_keeps_empty_groups() {
    let mut event = Event::default();
    event.lost(1, 0.0, 0.0, 0.0);
    let b = event.hit(2, 5.0, 0.0, 0.0);
    event.lost(3, 10.0, 0.0, 0.0);
    event.lost(3, 11.0, 0.0, 0.0);

    let output = combine(&event, CombinerConfig::new().with_min_hits(0));

    assert_eq!(output.len(), 3);
    assert!(output[0].is_empty());
    assert_eq!(refs(&output[1]), vec![b]);
    assert!(output[2].is_empty());
}

#[test]
fn test_threshold_drops_small_groups() {
    let mut event = Event::default();
    event.hit(1, 0.0, 0.0, 0.0);
    let b = event.hit(2, 5.0, 0.0, 0.0);
    let c = event.hit(2, 6.0, 0.0, 0.0);
    event.hit(3, 10.0, 0.0, 0.0);

    let output = combine(&event, CombinerConfig::new().with_min_hits(2));

    assert_eq!(output.len(), 1);
    assert_eq!(refs(&output[0]), vec![b, c]);
}

#[test]
fn test_scan_reaches_later_tracks_only() {
    let mut event = Event::default();
    let a = event.hit(1, 0.0, 0.0, 0.0);
    let b = event.hit(2, 10.0, 0.0, 0.0);
    let c = event.hit(3, 0.03, 0.0, 0.0);

    let output = combine(&event, CombinerConfig::default());

    assert_eq!(output.len(), 3);
    // Track 1 sees the track 3 hit past the track 2 group.
    assert_eq!(refs(&output[0]), vec![a, c]);
    assert_eq!(refs(&output[1]), vec![b]);
    // Track 3 never looks back at track 1.
    assert_eq!(refs(&output[2]), vec![c]);
}

#[test]
fn test_returning_track_id_starts_a_new_group() {
    let mut event = Event::default();
    let a = event.hit(1, 0.0, 0.0, 0.0);
    let b = event.hit(2, 5.0, 0.0, 0.0);
    let c = event.hit(1, 0.01, 0.0, 0.0);

    let output = combine(&event, CombinerConfig::new().with_min_hits(0));

    // c is close to a but shares its track id, so it is never a fake for the
    // first run even though the runs are separate groups.
    assert_eq!(output.len(), 3);
    assert_eq!(refs(&output[0]), vec![a]);
    assert_eq!(refs(&output[1]), vec![b]);
    assert_eq!(refs(&output[2]), vec![c]);
}

#[test]
fn test_lost_hit_still_triggers_fake_scan() {
    let mut event = Event::default();
    event.lost(1, 0.0, 0.0, 0.0);
    let b = event.hit(2, 0.0, 0.05, 0.0);

    let output = combine(&event, CombinerConfig::default());

    assert_eq!(output.len(), 2);
    assert_eq!(refs(&output[0]), vec![b]);
    assert_eq!(refs(&output[1]), vec![b]);
}

#[test]
fn test_shared_rec_hit_is_not_its_own_fake() {
    let mut event = Event::default();
    let shared = event.hit(1, 0.0, 0.0, 0.0);
    event
        .sim_hits
        .push(SimHit::new(2, LocalPoint::new(0.0, 0.0, 0.0), DET));
    event.sim_to_rec.push(Some(shared));

    let output = combine(&event, CombinerConfig::default());

    assert_eq!(output.len(), 2);
    assert_eq!(refs(&output[0]), vec![shared]);
    assert_eq!(refs(&output[1]), vec![shared]);
}

#[test]
fn test_duplicate_fakes_kept_by_default() {
    let mut event = Event::default();
    let a = event.hit(1, 0.0, 0.0, 0.0);
    let b = event.hit(1, 0.02, 0.0, 0.0);
    let fake = event.hit(2, 0.01, 0.0, 0.0);

    let output = combine(&event, CombinerConfig::default());

    assert_eq!(refs(&output[0]), vec![a, fake, b, fake]);
    assert_eq!(refs(&output[1]), vec![fake]);
}

#[test]
fn test_duplicate_fakes_skipped_on_request() {
    let mut event = Event::default();
    let a = event.hit(1, 0.0, 0.0, 0.0);
    let b = event.hit(1, 0.02, 0.0, 0.0);
    let fake = event.hit(2, 0.01, 0.0, 0.0);

    let combiner = HitCombiner::new(
        CombinerConfig::default().with_duplicate_fakes(DuplicatePolicy::Skip),
    );
    let mut state = combiner.create_state();
    let output = combiner
        .combine(
            &event.sim_hits,
            &event.sim_to_rec,
            &event.rec_hits,
            &geometry(),
            &mut state,
        )
        .unwrap();

    assert_eq!(refs(&output[0]), vec![a, fake, b]);
    let stats = state.statistics();
    assert_eq!(stats.fake_hits, 1);
    assert_eq!(stats.duplicate_fakes_skipped, 1);
}

#[test]
fn test_match_radius_is_strict() {
    let mut event = Event::default();
    event.hit(1, 0.0, 0.0, 0.0);
    event.hit(2, 0.5, 0.0, 0.0);
    event.hit(3, 0.0, 0.4999, 0.0);

    let output = combine(&event, CombinerConfig::new().with_match_radius(0.5));
    assert_eq!(output[0].len(), 2);

    let mut event = Event::default();
    event.hit(1, 0.0, 0.0, 0.0);
    event.hit(2, 0.1, 0.0, 0.0);

    let output = combine(&event, CombinerConfig::default());
    assert_eq!(output[0].len(), 1);
}

#[test]
fn test_sim_position_goes_through_geometry() {
    let rotated = DetId(7);
    let geometry = PlacementTable::new().with_placement(
        rotated,
        Placement::rotated_z(GlobalPoint::new(10.0, 0.0, 0.0), FRAC_PI_2),
    );

    let mut rec_hits = RecHitCollection::new();
    let own = rec_hits
        .push(RecHit::new(rotated, GlobalPoint::new(10.0, 1.0, 0.0)))
        .unwrap();
    let fake = rec_hits
        .push(RecHit::new(rotated, GlobalPoint::new(10.0, 1.05, 0.0)))
        .unwrap();
    let sim_hits = [
        SimHit::new(1, LocalPoint::new(1.0, 0.0, 0.0), rotated),
        SimHit::new(2, LocalPoint::new(1.05, 0.0, 0.0), rotated),
    ];
    let sim_to_rec = [Some(own), Some(fake)];

    let event = EventHits {
        sim_hits: &sim_hits,
        sim_to_rec: &sim_to_rec,
        rec_hits: &rec_hits,
    };
    let output = combine_event(&HitCombiner::default(), event, &geometry).unwrap();

    assert_eq!(refs(&output[0]), vec![own, fake]);
    assert_eq!(refs(&output[1]), vec![fake]);
}

#[test]
fn test_mismatched_lengths_are_rejected() {
    let mut event = Event::default();
    event.hit(1, 0.0, 0.0, 0.0);
    event.sim_to_rec.push(None);

    let err = combine_event(&HitCombiner::default(), event.view(), &geometry()).unwrap_err();
    assert_eq!(
        err,
        Error::LengthMismatch {
            sim_hits: 1,
            rec_refs: 2
        }
    );
}

#[test]
fn test_events_are_independent() {
    let mut first = Event::default();
    let a = first.hit(1, 0.0, 0.0, 0.0);
    // Ends mid-track: the next event must not continue this group.
    let mut second = Event::default();
    let b = second.hit(1, 0.0, 0.0, 0.0);
    second.hit(2, 0.05, 0.0, 0.0);

    let combined = combine_events(
        &HitCombiner::default(),
        [first.view(), second.view()],
        &geometry(),
    )
    .unwrap();

    assert_eq!(combined.events.len(), 2);
    assert_eq!(combined.events[0].len(), 1);
    assert_eq!(refs(&combined.events[0][0]), vec![a]);
    assert_eq!(combined.events[1].len(), 2);
    assert_eq!(combined.events[1][0].len(), 2);
    assert_eq!(combined.events[1][0].as_slice()[0], b);
    assert_eq!(combined.combination_count(), 3);

    let stats = combined.statistics;
    assert_eq!(stats.events_processed, 2);
    assert_eq!(stats.sim_hits_processed, 3);
    assert_eq!(stats.track_groups, 3);
    assert_eq!(stats.true_hits, 3);
    assert_eq!(stats.fake_hits, 1);
}

#[test]
fn test_failing_event_reports_its_index() {
    let good = Event::default();
    let mut bad = Event::default();
    bad.sim_hits
        .push(SimHit::new(1, LocalPoint::default(), DetId(42)));
    bad.sim_to_rec.push(None);

    let err = combine_events(
        &HitCombiner::default(),
        [good.view(), bad.view()],
        &geometry(),
    )
    .unwrap_err();

    assert_eq!(err, Error::UnknownDetector(DetId(42)).in_event(1));
}
