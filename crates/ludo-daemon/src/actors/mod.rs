mod notifier;
mod table;
mod timer;

pub use notifier::{NotifierActor, NotifierHandle};
pub use table::{TableActor, TableCommand, TableHandle};
pub use timer::{TimerActor, TimerCommand, TimerHandle};
