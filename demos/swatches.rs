use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use rgb::RGB8;
use wallpaper_tones::{Channel, ColorScheme, PaletteGenerator, TonalGenerator,
                      ViewingConditions, SHADES};

type Err = Box<dyn Error>;

fn css_string(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

fn channel_row(fh: &mut impl Write, scheme: &ColorScheme, ch: Channel)
               -> Result<(), Err> {
    writeln!(fh, "<tr><td style=\"padding-right: 7px\">{}</td>", ch.name())?;
    for c in scheme.channel(ch).values() {
        writeln!(fh, "  <td style=\"width: 43px; height: 30px; \
                      background-color: {}\"></td>",
                 css_string(*c))?;
    }
    writeln!(fh, "</tr>")?;
    Ok(())
}

fn scheme_table(fh: &mut impl Write, seed: RGB8, chroma: f64)
                -> Result<(), Err> {
    let scheme = TonalGenerator::default()
        .generate(seed, chroma, &ViewingConditions::default(), true)?;
    writeln!(fh, "<h3>Seed {} (chroma × {chroma})</h3>", css_string(seed))?;
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr><td></td>")?;
    for s in SHADES {
        writeln!(fh, "  <td style=\"font-size: 9px\">{s}</td>")?;
    }
    writeln!(fh, "</tr>")?;
    for ch in Channel::ALL {
        channel_row(fh, &scheme, ch)?;
    }
    writeln!(fh, "</table><br/>")?;
    Ok(())
}

fn main() -> Result<(), Err> {
    let mut fh = BufWriter::new(File::create("swatches.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>wallpaper-tones: {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;
    for seed in [RGB8::new(0x3f, 0x51, 0xb5), RGB8::new(0xe9, 0x1e, 0x63),
                 RGB8::new(0x4c, 0xaf, 0x50), RGB8::new(0x90, 0x90, 0x98)] {
        scheme_table(&mut fh, seed, 1.)?;
    }
    scheme_table(&mut fh, RGB8::new(0x3f, 0x51, 0xb5), 0.5)?;
    scheme_table(&mut fh, RGB8::new(0x3f, 0x51, 0xb5), 2.)?;
    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
