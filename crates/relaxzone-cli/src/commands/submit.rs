use std::path::Path;

use relaxzone_core::MemeSubmissionForm;

pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut form = MemeSubmissionForm::new();
    let selected = form.select(path)?;
    if let Some(preview) = selected.preview_url() {
        eprintln!("preview: {preview}");
    }
    let receipt = form.submit()?;
    eprintln!(
        "Meme submitted! \"{}\" is on its way to spread joy (simulated).",
        receipt.file_name
    );
    println!("{}", serde_json::to_string_pretty(&receipt.to_event())?);
    Ok(())
}
