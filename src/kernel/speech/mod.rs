pub mod actuator;

pub use actuator::{enable_asr_best_effort, ImmediateSpeechActuator, SpeechActuator, ENABLE_ASR_TIMEOUT};
