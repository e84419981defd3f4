use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::kernel::error::ActuatorError;

/// Upper bound on waiting for the recognizer to acknowledge `enable_asr`.
pub const ENABLE_ASR_TIMEOUT: Duration = Duration::from_millis(500);

/// Switches the upstream speech recognizer on and off.
///
/// The request is fire-and-forget; the returned receiver resolves once the
/// device acknowledges it.
pub trait SpeechActuator: Send + Sync {
    fn enable_asr(&self, enabled: bool) -> oneshot::Receiver<Result<(), ActuatorError>>;
}

/// Acknowledges every request at once. Used by the demo binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateSpeechActuator;

impl SpeechActuator for ImmediateSpeechActuator {
    fn enable_asr(&self, enabled: bool) -> oneshot::Receiver<Result<(), ActuatorError>> {
        let (tx, rx) = oneshot::channel();
        debug!("ASR {}", if enabled { "enabled" } else { "disabled" });
        let _ = tx.send(Ok(()));
        rx
    }
}

/// Enables ASR, waiting at most `ENABLE_ASR_TIMEOUT`. Never fails: every
/// problem is logged and swallowed. Returns whether the device acknowledged.
pub async fn enable_asr_best_effort(actuator: &dyn SpeechActuator) -> bool {
    debug!("Enabling ASR");
    match timeout(ENABLE_ASR_TIMEOUT, actuator.enable_asr(true)).await {
        Ok(Ok(Ok(()))) => true,
        Ok(Ok(Err(e))) => {
            warn!("Enabling ASR failed: {}", e);
            false
        }
        Ok(Err(_)) => {
            warn!("Enabling ASR failed: acknowledgement dropped");
            false
        }
        Err(_) => {
            warn!("Enabling ASR timed out after {:?}", ENABLE_ASR_TIMEOUT);
            false
        }
    }
}
