//! Tests that run the locator and the scanner together, the way a grammar
//! layered on top of them would.
