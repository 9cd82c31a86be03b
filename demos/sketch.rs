use hll::HyperLogLog;

fn main() -> hll::Result<()> {
    let mut sketch1 = HyperLogLog::new(10)?;
    for i in 0..10_000 {
        sketch1.add(&format!("item-{}", i));
    }
    println!("sketch1 cardinality = {:.0}", sketch1.cardinality());

    let mut sketch2 = HyperLogLog::new(10)?;
    for i in 5_000..15_000 {
        sketch2.add(&format!("item-{}", i));
    }
    println!("sketch2 cardinality = {:.0}", sketch2.cardinality());

    sketch1.merge(&sketch2)?;
    println!("merged cardinality = {:.0}", sketch1.cardinality());

    let restored = HyperLogLog::from_registers(
        sketch1.precision(),
        sketch1.seed(),
        &sketch1.registers(),
    )?;
    println!("restored cardinality = {:.0}", restored.cardinality());

    println!("murmur3(\"abc\") = {:#010x}", hll::murmur3_hash(b"abc", hll::DEFAULT_SEED));
    Ok(())
}
