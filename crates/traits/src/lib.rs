//! Platform abstraction traits for the mixview rendering pipeline.
//!
//! Nothing in here knows about HTML. These are the narrow contracts the
//! renderer needs from its surroundings: where template bytes come from, what
//! the current request looks like, how validation messages and
//! classifications are resolved, and where the finished page goes.

pub mod classification;
pub mod messages;
pub mod resource;
pub mod web;

pub use classification::{
    Classification, ClassificationError, ClassificationProvider, InMemoryClassificationProvider,
};
pub use messages::{
    ACTION_ERRORS_KEY, ActionMessage, ActionMessages, GLOBAL_PROPERTY_KEY, InMemoryMessageResolver,
    MessageError, MessageResolver,
};
pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
pub use web::{
    ActionRuntime, BufferedResponse, RequestContext, ResponseError, ResponseWriter,
    StaticRequestContext,
};
