//! # Pupil dilation models
//!
//! Each variant returns a dedicated output struct. Internal signals that are
//! only needed for analysis sit in `Option` fields filled by the
//! `forward_with_activations` methods.
//!
//! | Model | Input | Internal signals |
//! |-------|-------|------------------|
//! | [`LstmGadget`] | `[batch, seq, features]` | LC, NE, forget/input/output gates, modulated hidden |
//! | [`LcneLstm`] | `[batch, features]` + [`LcneLstmState`] | LC, NE, cortex, cell, gates |
//! | [`LcneNetwork`] | `[batch, features]` + [`LcneState`] | LC, NE, cortex, raw drives |
//! | [`FeedForwardNet`] | `[batch, features]` | layer 1, layer 2 |
//! | [`LstmRegressor`] | `[batch, seq, features]` | hidden, cell |
//!
//! Recurrent state is always passed in explicitly and built fresh with
//! `initial_state`/`zeros`; no model keeps state between calls.

pub mod feed_forward;
pub mod lcne_lstm;
pub mod lcne_network;
pub mod lstm_gadget;
pub mod lstm_regressor;

pub use feed_forward::{FeedForwardActivations, FeedForwardNet, FeedForwardOutput};
pub use lcne_lstm::{LcneLstm, LcneLstmOutput, LcneLstmState};
pub use lcne_network::{LcneNetwork, LcneOutput, LcneRaw, LcneState};
pub use lstm_gadget::{LstmGadget, LstmGadgetOutput};
pub use lstm_regressor::{LstmRegressor, LstmRegressorOutput};
