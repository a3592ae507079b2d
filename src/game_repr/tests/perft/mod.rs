use super::*;

mod starting_position;
mod kiwipete;
mod endgame;
mod middle_game;
mod complex_promotions;
mod symmetrical;
