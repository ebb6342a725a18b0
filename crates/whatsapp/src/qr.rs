use {
    anyhow::{Context, Result},
    qrcode::{Color, EcLevel, QrCode},
};

/// Render a QR code for the terminal using Unicode half blocks.
///
/// Two module rows are packed into one text line with `▀`, `▄`, `█` and
/// space, with a one-module quiet zone around the code.
pub fn render_terminal(data: &str) -> Result<String> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L)
        .context("QR generation failed")?;

    let width = code.width();
    let colors = code.into_colors();
    // Quiet zone of one module on every side.
    let size = width + 2;
    let is_dark = |row: usize, col: usize| -> bool {
        if row == 0 || col == 0 || row > width || col > width {
            return false;
        }
        colors[(row - 1) * width + (col - 1)] == Color::Dark
    };

    let mut out = String::with_capacity(size * (size / 2 + 1) * 3);
    let mut row = 0;
    while row < size {
        for col in 0..size {
            out.push(match (is_dark(row, col), is_dark(row + 1, col)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            });
        }
        out.push('\n');
        row += 2;
    }
    Ok(out)
}
