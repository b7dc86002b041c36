#![no_main]

use libfuzzer_sys::fuzz_target;
use shapekit_scene::Scene;

// Arbitrary bytes must never panic the document parser; a parsed scene must
// re-serialize.
fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(scene) = Scene::from_json(text) {
            let _ = scene.to_json_pretty();
        }
    }
});
