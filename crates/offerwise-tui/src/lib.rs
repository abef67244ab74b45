// Terminal front end for the negotiation simulator.

pub mod tui;
