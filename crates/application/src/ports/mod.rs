//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod host_port;
mod inference_port;
mod speech_port;

#[cfg(test)]
pub use host_port::MockHostTtsPort;
pub use host_port::{HostTtsPort, SpeakRequest};
#[cfg(test)]
pub use inference_port::MockInferencePort;
pub use inference_port::{GenerationRequest, InferencePort, InferenceResult};
#[cfg(test)]
pub use speech_port::{MockRecognitionPort, MockSynthesisPort};
pub use speech_port::{
    RecognitionEncoding, RecognitionPort, RecognitionSettings, SynthesisInput, SynthesisPort,
};
