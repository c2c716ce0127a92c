use focuslock::{
    Bbox, FocusPipeline, FrameData, NullRenderer, PipelineConfig, PixelFormat, RawDetection,
    Renderer, StubDetector,
};

fn main() -> Result<(), focuslock::PipelineError> {
    println!("Focus-lock demo: two subjects, click on the first, coast through a gap");

    let mut detector = StubDetector::new();
    for step in 0..6 {
        let shift = step as f32 * 10.0;
        detector.push_frame(vec![
            RawDetection::person(Bbox::new(100.0 + shift, 200.0, 60.0, 140.0), 0.92),
            RawDetection::person(Bbox::new(800.0 - shift, 180.0, 70.0, 150.0), 0.85),
            RawDetection::new(Bbox::new(500.0, 500.0, 120.0, 60.0), 0.9, "car"),
        ]);
    }
    // Detector drops out for two frames, then the subjects return.
    detector.push_failure("transient inference timeout");
    detector.push_frame(vec![]);
    detector.push_frame(vec![
        RawDetection::person(Bbox::new(180.0, 200.0, 60.0, 140.0), 0.9),
        RawDetection::person(Bbox::new(720.0, 180.0, 70.0, 150.0), 0.84),
    ]);

    let mut pipeline = FocusPipeline::new(PipelineConfig::default(), Box::new(detector))?;
    let mut renderer = NullRenderer;

    let frame = FrameData::new(vec![0u8; 1280 * 720 * 3], 1280, 720, PixelFormat::Rgb);

    for step in 1..=9 {
        let tracks = pipeline.process_frame(&frame)?;

        if step == 2 {
            // Click on the first subject in 640x360 canvas space.
            let selected = pipeline.select_at(65.0, 130.0);
            println!("  click -> selected track {selected:?}");
        }

        renderer.render(&frame, &tracks, pipeline.selected_id())?;

        print!("Frame {step}: {} tracks", tracks.len());
        if let Some(track) = pipeline.selected_track() {
            print!(
                " | locked on {} at ({:.0}, {:.0}) age={}",
                track.id, track.bbox.x, track.bbox.y, track.age
            );
        }
        println!();
    }

    Ok(())
}
