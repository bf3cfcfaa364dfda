pub mod istio;
pub mod ocp;
pub mod registry_puller;
