use crate::resolver::ResolvedMedia;

/// One outgoing reply unit, delivered back through the platform in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplySegment {
    Text(String),
    Video { url: String },
    Image { url: String },
}

/// Build the ordered reply for resolved media: one metadata text segment,
/// then the media itself (a single video, or every image in API order).
pub fn format_reply(media: &ResolvedMedia) -> Vec<ReplySegment> {
    match media {
        ResolvedMedia::Video { author, title, url } => {
            vec![
                ReplySegment::Text(metadata_text(author, title)),
                ReplySegment::Video { url: url.clone() },
            ]
        }
        ResolvedMedia::ImageSet {
            author,
            title,
            images,
        } => {
            let mut segments = Vec::with_capacity(images.len() + 1);
            segments.push(ReplySegment::Text(metadata_text(author, title)));
            segments.extend(
                images
                    .iter()
                    .map(|url| ReplySegment::Image { url: url.clone() }),
            );
            segments
        }
    }
}

fn metadata_text(author: &str, title: &str) -> String {
    if title.is_empty() {
        format!("作者: {}", author)
    } else {
        format!("作者: {}\n{}", author, title)
    }
}
