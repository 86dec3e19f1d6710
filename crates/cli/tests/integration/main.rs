mod common;
mod newdep_tests;
mod restore_tests;
