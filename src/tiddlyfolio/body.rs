//! Composes the body text of a figure tiddler.
//!
//! Each image becomes one markdown image line (with its own `\n`), and the
//! description follows the images:
//!
//! ```text
//! ![image](figs/p30.png){:width="1000"}
//! ![image](figs/p31.png){:width="1000"}
//! Temperature against depth, run 1.
//! ```

/// Width of embedded images unless configured otherwise.
pub const DEFAULT_IMAGE_WIDTH: u32 = 1000;

/// One image line in the markdown dialect TiddlyWiki's markdown plugin reads.
pub fn markdown_image(link: &str, width: u32) -> String {
    format!("![image]({}){{:width=\"{}\"}}\n", link, width)
}

pub fn compose(image_links: &[String], description: &str, width: u32) -> String {
    let mut body: String = image_links
        .iter()
        .map(|link| markdown_image(link, width))
        .collect();
    body.push_str(description);
    body
}
