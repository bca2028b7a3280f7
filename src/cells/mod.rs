//! # Single-step cells
//!
//! Cells process one timestep (or one trial) at a time and are wrapped by the
//! sequence layers in [`crate::rnn`] and the models in [`crate::models`].
//!
//! ## Cell Types
//!
//! | Cell | Description | Use Case |
//! |------|-------------|----------|
//! | [`LSTMCell`] | Standard LSTM, gates in `i, f, g, o` order | Cortical memory, baselines |
//! | [`LcneGadget`] | LC, NE and gate signals from a hidden state | Neuromodulation of an LSTM |
//!
//! ## LC-NE Gadget
//!
//! ```text
//! lc     = tanh(W_lc · h)
//! ne     = σ(W_ne · lc)
//! f,i,o  = σ(W_f · h), σ(W_i · h), σ(W_o · h)
//! h'     = f ⊙ h + i ⊙ ne
//! ```
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape | Description |
//! |--------|-------|-------------|
//! | `input` | `[batch, input_size]` | Input features |
//! | `hidden` | `[batch, hidden_size]` | Hidden state |
//! | gadget signals | `[batch, hidden_size]` | LC, NE and each gate |

pub mod lcne_gadget;
pub mod lstm_cell;

pub use lcne_gadget::{GadgetSignals, GateSignals, LcneGadget};
pub use lstm_cell::{LSTMCell, LstmGates, LstmState};
