mod supersession_tests;
mod support;
