use relaxzone_core::Config;

pub fn run(count: usize) -> Result<(), Box<dyn std::error::Error>> {
    let mut rotator = Config::load_or_default().quote_rotator();
    for _ in 0..count.max(1) {
        match rotator.next_quote() {
            Some(quote) => println!("\"{quote}\""),
            None => return Err("no quotes available".into()),
        }
    }
    Ok(())
}
