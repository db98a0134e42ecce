pub mod subscriber;

pub const DEFAULT_JSON_LOG_FILE: &str = "chase-log.json";

// chase log record fields:
pub const EVENT_FIELD: &str = "event";
pub const INSTANCE_ID_FIELD: &str = "instance_id";
pub const ROUND_FIELD: &str = "round";
pub const INSTANCE_FIELD: &str = "instance";

// trigger log record fields:
pub const DEPENDENCY_FIELD: &str = "dependency";
pub const MAPPING_FIELD: &str = "mapping";

// log span types:
/// Inside one round of a chase run
pub const CHASE_ROUND: &str = "@chase_round";

// log event types:
/// A trigger was selected and fired.
pub const FIRE: &str = "@fire";

/// The instance was extended with witnesses and tuples.
pub const EXTEND: &str = "@extend";

/// The instance was quotiented by a batch of equations.
pub const QUOTIENT: &str = "@quotient";

/// A fold pass merged duplicate elements.
pub const FOLD: &str = "@fold";

/// A fresh witness element was minted.
pub const WITNESS: &str = "@witness";

/// No trigger is active; a fixpoint was reached.
pub const FIXPOINT: &str = "@fixpoint";

/// A round or step cap was hit; the result may be incomplete.
pub const CAPPED: &str = "@capped";

/// A final model is being returned.
pub const MODEL: &str = "@model";
