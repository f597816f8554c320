mod state_transition_tests;
mod support;
