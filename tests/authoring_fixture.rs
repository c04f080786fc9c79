use cinereel::{CutsceneLoader, ResourceId, Vec3};

#[test]
fn json_fixture_parses_and_validates() {
    let bytes = include_bytes!("data/intro.json");
    let id = ResourceId::parse("demo:intro").unwrap();
    let cutscene = CutsceneLoader::parse(bytes, id).unwrap();
    cutscene.validate().unwrap();

    assert_eq!(cutscene.name, "Intro Cutscene");
    assert_eq!(cutscene.duration, 10.0);
    assert_eq!(cutscene.composition.len(), 2);
    assert_eq!(cutscene.frames.len(), 2);
    assert!(cutscene.skin_mapping.as_ref().unwrap().enabled);
}

#[test]
fn fixture_camera_interpolates_between_authored_keyframes() {
    let bytes = include_bytes!("data/intro.json");
    let id = ResourceId::parse("demo:intro").unwrap();
    let cutscene = CutsceneLoader::parse(bytes, id).unwrap();

    let state = cutscene.camera_state_at(2.5);
    assert_eq!(state.position, Vec3::new(2.5, 5.0, 7.5));
    assert_eq!(state.rotation, Vec3::new(0.0, 22.5, 0.0));
}

#[test]
fn fixture_frames_hold_discrete_state() {
    let bytes = include_bytes!("data/intro.json");
    let id = ResourceId::parse("demo:intro").unwrap();
    let cutscene = CutsceneLoader::parse(bytes, id).unwrap();

    // Between the two authored frames the earlier one is held verbatim.
    let frame = cutscene.frame_at(3.0).unwrap();
    assert_eq!(frame.time, 0.0);
    assert_eq!(frame.entities[0].position, Vec3::new(2.0, 0.0, 3.0));
}
