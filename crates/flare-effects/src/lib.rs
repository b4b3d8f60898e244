pub mod anamorphic;

pub use anamorphic::{
    apply, brightness, tap_decay, AnamorphicFlare, FlareProcessor, DECAY_FALLOFF, FLARE_TINT,
    SAMPLE_OFFSETS,
};
