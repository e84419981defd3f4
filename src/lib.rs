pub mod kernel;

pub use kernel::config::{TaskOptions, WaitConfig};
pub use kernel::environment::TaskEnvironment;
pub use kernel::event::{LanguageTag, Understanding};
pub use kernel::reactor::{Reactor, RunOutcome};
pub use kernel::signal::{ExitSignal, ExitStatus};
pub use kernel::task::{TaskState, WaitTask};
