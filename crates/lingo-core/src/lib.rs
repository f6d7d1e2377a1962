// ABOUTME: Core library for lingo: chat message pipeline over pluggable AI capabilities
// ABOUTME: Exposes the message store, capability contract, pipeline controller, notices and config

pub mod capability;
pub mod config;
pub mod error;
pub mod language;
pub mod message;
pub mod notice;
pub mod pipeline;
pub mod store;

pub use capability::{Availability, Capability, CapabilityProvider, NoCapabilities};
pub use config::Config;
pub use error::{CapabilityError, PipelineError};
pub use language::{Detection, Language};
pub use message::{Message, MessageId, Translation};
pub use notice::{Notice, NoticeKind};
pub use pipeline::{Pipeline, PipelineConfig, PipelineEvent};
