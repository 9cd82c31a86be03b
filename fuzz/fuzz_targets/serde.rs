#![no_main]

use hll::HyperLogLog;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(mut sketch) = serde_json::from_slice::<HyperLogLog>(data) {
        assert_eq!(sketch.registers().len(), sketch.size() as usize);
        sketch.add(b"1");
        assert!(sketch.cardinality() > 0.0);
    }
});
