// Interface adapters: wire protocol, outbound clients and socket handling.

pub mod clients;
pub mod net;
pub mod protocol;
pub mod state;
