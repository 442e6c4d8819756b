// Domain layer: models, search events and the ports the orchestrator talks through.

pub mod events;
pub mod model;
pub mod ports;
