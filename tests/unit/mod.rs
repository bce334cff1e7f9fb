/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/8/26
******************************************************************************/

//! Integration tests exercising the public crate surface.

mod sequence_tests;
mod transcript_tests;
