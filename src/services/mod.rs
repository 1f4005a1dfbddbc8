// Exercise visibility services
// Services are stateless passes over a render: extraction, header derivation,
// expansion, plus settings access.

pub mod date_group_aggregator;
pub mod expansion;
pub mod identity_extractor;
pub mod settings_engine;
