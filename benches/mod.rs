/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/8/26
******************************************************************************/

use criterion::{criterion_group, criterion_main};


criterion_group!(
    benches,
    sequence_bench::bench_threaded_run,
    sequence_bench::bench_channel_run,
    sequence_bench::bench_transcript_verify
);
criterion_main!(benches);
