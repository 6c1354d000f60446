#[macro_use]
extern crate afl;
extern crate ubx_decoder;

use ubx_decoder::{FixedBuffer, SemanticRecord, UbxDecoder, UnderlyingBuffer};

fn is_ack(item: &Result<ubx_decoder::Decoded, ubx_decoder::Error>) -> bool {
    matches!(
        item,
        Ok(ubx_decoder::Decoded {
            record: SemanticRecord::Acknowledge(_),
            ..
        })
    )
}

fn decode<B: UnderlyingBuffer>(mut decoder: UbxDecoder<B>, chunksize: usize, data: &[u8]) {
    for chunk in data.chunks(chunksize) {
        // Records, framing errors and decode errors are all fine here, the
        // decoder only must not panic
        for _item in decoder.consume(chunk) {}
    }

    let ack_ack = [0xb5, 0x62, 0x5, 0x1, 0x2, 0x0, 0x4, 0x5, 0x11, 0x38];
    {
        // Clear out the buffer
        let num_acks = decoder.consume(&ack_ack).filter(is_ack).count();
        // We could conceivably end up with >1 ack, if the buffer ended in
        // a too-large frame, a subset of which was an ack.
        assert!(num_acks >= 1);
    }
    let mut it = decoder.consume(&ack_ack);
    loop {
        match it.next() {
            Some(item) if is_ack(&item) => break,
            Some(Err(_)) => {
                // The buffer might contain any of a variety of errors
            },
            _ => panic!(),
        }
    }
    assert!(it.next().is_none());
}

fn main() {
    fuzz!(|data: &[u8]| {
        if data.len() > 2 {
            let chunksize = data[1] as usize;
            if chunksize != 0 {
                // Only frames up to ACK size fit, so any partial frame left
                // behind by the fuzz data is flushed when the ack arrives
                let decoder = UbxDecoder::builder()
                    .with_buffer(FixedBuffer::<10>::new())
                    .build();
                decode(decoder, chunksize, &data[2..]);
            }
        }
    });
}
