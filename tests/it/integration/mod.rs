//! Integration tests for backlot.
//!
//! These tests drive several components together through complete
//! workflows: gestures into the document, documents through a store.

mod editor_workflow_tests;
