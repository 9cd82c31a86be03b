#![no_main]

use hll::HyperLogLog;
use libfuzzer_sys::fuzz_target;
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let split_index = wyhash(data, 0) as usize % data.len();
    let (first_half, second_half) = data.split_at(split_index);
    let precision = 2 + data[0] % 15;

    let mut sketch1 = HyperLogLog::new(precision).unwrap();
    for chunk in first_half.chunks(4) {
        let before = sketch1.registers();
        sketch1.add(chunk);
        assert!(sketch1.cardinality() > 0.0);
        assert!(before.iter().zip(sketch1.registers()).all(|(b, a)| *b <= a));
    }

    let mut sketch2 = HyperLogLog::new(precision).unwrap();
    for chunk in second_half.chunks(4) {
        sketch2.add(chunk);
        assert!(sketch2.cardinality() > 0.0);
    }

    let lhs = sketch1.registers();
    let rhs = sketch2.registers();
    sketch1.merge(&sketch2).unwrap();
    for (i, rank) in sketch1.registers().into_iter().enumerate() {
        assert_eq!(rank, lhs[i].max(rhs[i]));
    }
});
