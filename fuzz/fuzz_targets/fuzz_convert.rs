#![no_main]

use voxgrid::{MaterialId, MaterialMapping, MaterialOverrides, UnknownIndexPolicy};

/// Grids larger than this are parsed but not built, to keep memory use bounded.
const MAX_VOLUME: usize = 1 << 20;

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    auto_identity: bool,
    fallback: Option<u32>,
    data: Vec<u8>,
}

libfuzzer_sys::fuzz_target!(|input: FuzzInput| test(input));

fn test(input: FuzzInput) {
    let Ok(model) = voxgrid::mv::load_dot_vox(&input.data) else {
        return;
    };
    let Some(volume) = model.size.volume().filter(|&v| v <= MAX_VOLUME) else {
        return;
    };

    let policy =
        UnknownIndexPolicy::from_flags(input.auto_identity, input.fallback.map(MaterialId));
    let mapping = MaterialMapping::new(MaterialOverrides::builtin(), policy);
    match voxgrid::convert_model(&model, &mapping) {
        Ok(conversion) => {
            assert_eq!(conversion.document.blocks.len(), volume);
            assert_eq!(conversion.document.size, model.size);
        }
        Err(error) => {
            // Only strict mode can reject a model of reasonable size.
            assert_eq!(policy, UnknownIndexPolicy::Strict, "{error}");
        }
    }
}
