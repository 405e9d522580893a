//! CLI infrastructure for the Tic-Tac-Toe solver
//!
//! This module provides the command-line interface for playing interactive
//! games and for inspecting solved positions.

pub mod commands;
pub mod output;
