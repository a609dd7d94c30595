//! Terminal frontend. Player 1 is driven from the keyboard; Player 2 is the
//! scripted opponent run by an [`AgentTable`](crate::agents::AgentTable).

pub mod app;
pub mod controller;
mod ui;
