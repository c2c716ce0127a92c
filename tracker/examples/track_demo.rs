use greedytrack::{Bbox, Detection, GreedyTracker, TrackerConfig};

fn main() -> anyhow::Result<()> {
    println!("Tracking two walking subjects through a detection gap...");

    let mut tracker = GreedyTracker::new(TrackerConfig::default());

    // Frame 1: two subjects appear
    let tracks = tracker.update(&[
        Detection::new(Bbox::new(10.0, 100.0, 60.0, 130.0), 0.92),
        Detection::new(Bbox::new(500.0, 90.0, 55.0, 140.0), 0.81),
    ])?;
    print_tracks(1, &tracks);

    // Frames 2-4: both walk right, detector confirms each frame
    for frame in 2..=4 {
        let shift = (frame - 1) as f32 * 12.0;
        let tracks = tracker.update(&[
            Detection::new(Bbox::new(10.0 + shift, 100.0, 60.0, 130.0), 0.9),
            Detection::new(Bbox::new(500.0 + shift, 90.0, 55.0, 140.0), 0.8),
        ])?;
        print_tracks(frame, &tracks);
    }

    // Frames 5-7: the detector loses both; tracks coast on their velocity
    for frame in 5..=7 {
        let tracks = tracker.update(&[])?;
        print_tracks(frame, &tracks);
    }

    // Frame 8: the first subject reappears near its predicted position
    let tracks = tracker.update(&[Detection::new(
        Bbox::new(10.0 + 7.0 * 12.0, 100.0, 60.0, 130.0),
        0.88,
    )])?;
    print_tracks(8, &tracks);

    Ok(())
}

fn print_tracks(frame: u32, tracks: &[greedytrack::Track]) {
    println!("Frame {frame}: {} tracks", tracks.len());
    for t in tracks {
        println!(
            "  Track {}: {} age={} vel=({:.1}, {:.1}) score={:.2}",
            t.id, t.bbox, t.age, t.velocity.0, t.velocity.1, t.score
        );
    }
}
