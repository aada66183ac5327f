//! Plain-text rendering of flow state.

use whatlunch_core::{Genre, Restaurant};
use whatlunch_search::{FieldErrors, FlowView};

pub(crate) fn genres() -> String {
    Genre::ALL
        .into_iter()
        .map(|genre| format!("{:<10} {}\n", genre.name().to_lowercase(), genre.label()))
        .collect()
}

pub(crate) fn restaurant(r: &Restaurant) -> String {
    let details = [
        r.category_name.clone(),
        (!r.address.is_empty()).then(|| r.address.clone()),
        r.distance.map(|distance| format!("{distance}m away")),
        r.rating.map(|rating| format!("rating {rating:.1}")),
        r.phone.clone(),
        r.place_url.clone(),
    ];

    let mut out = format!("🍽  {}\n", r.name);
    for detail in details.into_iter().flatten() {
        out.push_str(&format!("   {detail}\n"));
    }
    out
}

pub(crate) fn errors(errors: &FieldErrors) -> String {
    [&errors.location, &errors.genre, &errors.search]
        .into_iter()
        .flatten()
        .map(|message| format!("! {message}\n"))
        .collect()
}

/// Selection (if any) followed by any error messages.
pub(crate) fn view(view: &FlowView) -> String {
    let mut out = String::new();
    if view.loading {
        out.push_str("...\n");
    }
    if let (Some(origin), Some(genre)) = (&view.origin, view.resolved_genre.or(view.genre)) {
        out.push_str(&format!(
            "{} near {} (within {}m)\n",
            genre.label(),
            origin.address,
            view.radius_m
        ));
    }
    if let Some(selection) = &view.selection {
        out.push_str(&restaurant(selection));
    }
    out.push_str(&errors(&view.errors));
    out
}
