use pulldown_cmark::{html, CowStr, Event, Tag};
use std::str::FromStr;
use url::Url;

/// Site-absolute links like `/foam/fps-energy` are routes, so they become
/// fragments. Anything that parses as a URL is left alone.
fn route_link(dest_url: CowStr) -> CowStr {
    if Url::from_str(&dest_url).is_err() && dest_url.starts_with('/') {
        format!("#{dest_url}").into()
    } else {
        dest_url
    }
}

pub fn render_markdown(input: &str) -> String {
    let events = pulldown_cmark::Parser::new(input).map(|event| match event {
        Event::Start(Tag::Link(link_type, dest_url, title)) => {
            Event::Start(Tag::Link(link_type, route_link(dest_url), title))
        }
        _ => event,
    });

    let mut contents = String::new();
    html::push_html(&mut contents, events);

    contents
}
