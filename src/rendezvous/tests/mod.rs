/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/8/26
******************************************************************************/

//! Tests for the rendezvous module.

pub mod cancellation;
pub mod termination;
