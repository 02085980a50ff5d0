use relaxzone_core::Config;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let player = config.music_player()?;
    println!("{}", player.embed_url());
    eprintln!("Open the link above in a browser to listen.");
    Ok(())
}
