use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::{actor, movie, name, tv_show},
    forms::NameForm,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

pub fn home_page(flash: Option<&str>, form: &NameForm) -> String {
    page(
        "Marquee",
        flash,
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "Marquee" }
            p class="mt-2 text-gray-600" { "Tell us who you are and which show you can't stop watching." }

            form class="mt-8 space-y-6" method="get" action="/names" {
                div {
                    label class="block text-sm font-medium text-gray-700" for="name" { "Please enter your name." }
                    input class=(INPUT_CLASS) name="name" id="name" maxlength="64" required value=(form.name.as_deref().unwrap_or_default());
                }

                div {
                    label class="block text-sm font-medium text-gray-700" for="query" { "What's your favorite TV show?" }
                    input class=(INPUT_CLASS) name="query" id="query" maxlength="64" required value=(form.query.as_deref().unwrap_or_default());
                }

                button class=(BUTTON_CLASS) type="submit" { "Submit" }
            }
        },
    )
}

pub fn names_page(names: &[name::Model]) -> String {
    page(
        "Names",
        None,
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "Names" }
            @if names.is_empty() {
                p class="mt-6 text-gray-600" { "Nobody has signed in yet." }
            } @else {
                ul class="mt-6 divide-y divide-gray-200" {
                    @for n in names {
                        li class="py-3" {
                            span class="font-medium text-gray-900" { (n.name) }
                            span class="text-gray-500" { " · favorite show: " (n.search_term) }
                        }
                    }
                }
            }
        },
    )
}

pub fn movies_page(
    flash: Option<&str>,
    actor: &str,
    movies: &[(movie::Model, Vec<actor::Model>)],
) -> String {
    page(
        "Movies",
        flash,
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "Movies" }

            form class="mt-8 space-y-6" method="post" action="/movies" {
                div {
                    label class="block text-sm font-medium text-gray-700" for="actor" { "Enter your favorite actor!" }
                    input class=(INPUT_CLASS) name="actor" id="actor" maxlength="64" required value=(actor);
                }
                button class=(BUTTON_CLASS) type="submit" { "Look up" }
            }

            @if movies.is_empty() {
                p class="mt-8 text-gray-600" { "No movies stored yet." }
            } @else {
                div class="mt-8 space-y-4" {
                    @for (m, actors) in movies {
                        (movie_card(m, actors))
                    }
                }
            }
        },
    )
}

pub fn actors_page(actors: &[(actor::Model, Option<movie::Model>)]) -> String {
    page(
        "Popular actors",
        None,
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "Popular actors" }
            @if actors.is_empty() {
                p class="mt-6 text-gray-600" { "No actors stored yet." }
            } @else {
                table class="mt-6 w-full text-left text-sm" {
                    thead {
                        tr class="text-gray-500" {
                            th class="py-2" { "Actor" }
                            th class="py-2" { "Popularity" }
                            th class="py-2" { "Top movie" }
                        }
                    }
                    tbody class="divide-y divide-gray-200" {
                        @for (a, top) in actors {
                            tr {
                                td class="py-2 font-medium text-gray-900" { (a.name) }
                                td class="py-2 text-gray-700" { (a.popularity) }
                                td class="py-2 text-gray-700" {
                                    @if let Some(m) = top { (m.title) } @else { "-" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn tv_shows_page(shows: &[tv_show::Model]) -> String {
    page(
        "TV shows",
        None,
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "TV shows" }
            @if shows.is_empty() {
                p class="mt-6 text-gray-600" { "No favorite shows resolved yet." }
            } @else {
                div class="mt-6 space-y-4" {
                    @for show in shows {
                        div class="border-l-4 border-purple-500 pl-4" {
                            h2 class="text-lg font-semibold text-gray-900" { (show.tv_show_name) }
                            @if !show.first_air_date.is_empty() {
                                p class="text-sm text-gray-500" { "First aired " (show.first_air_date) }
                            }
                            p class="mt-1 text-sm text-gray-700" { (show.overview) }
                        }
                    }
                }
            }
        },
    )
}

pub fn not_found_page(path: &str) -> String {
    page(
        "Page not found",
        None,
        html! {
            h1 class="text-2xl font-bold text-gray-900" { "Page not found" }
            p class="mt-4 text-gray-700" { "Nothing lives at " code { (path) } "." }
            a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        None,
        html! {
            h1 class="text-2xl font-bold text-gray-900" { "Error" }
            p class="mt-4 text-gray-700" { (message) }
            a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
        },
    )
}

fn page(title: &str, flash: Option<&str>, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    (nav())
                    @if let Some(message) = flash {
                        div class="mt-6 rounded-md border border-yellow-300 bg-yellow-50 px-4 py-3 text-sm text-yellow-800" role="alert" {
                            (message)
                        }
                    }
                    div class="mt-6 bg-white shadow rounded-lg p-8" { (body) }
                }
            }
        }
    }
    .into_string()
}

fn nav() -> Markup {
    const LINKS: [(&str, &str); 5] = [
        ("/", "Home"),
        ("/names", "Names"),
        ("/movies", "Movies"),
        ("/actors", "Actors"),
        ("/tv_shows", "TV shows"),
    ];

    html! {
        nav class="flex gap-4 text-sm" {
            @for (href, label) in LINKS {
                a class="text-blue-600 hover:text-blue-800" href=(href) { (label) }
            }
        }
    }
}

fn movie_card(m: &movie::Model, actors: &[actor::Model]) -> Markup {
    html! {
        div class="border-l-4 border-blue-500 pl-4" {
            h2 class="text-lg font-semibold text-gray-900" {
                (m.title)
                @if !m.release_date.is_empty() {
                    span class="ml-2 font-normal text-gray-500" { "(" (m.release_date) ")" }
                }
            }
            p class="mt-1 text-sm text-gray-700" { (m.description) }
            @if !actors.is_empty() {
                p class="mt-2 text-sm text-gray-500" {
                    "Top movie for: "
                    @for (i, a) in actors.iter().enumerate() {
                        @if i > 0 { ", " }
                        span class="font-medium text-gray-700" { (a.name) }
                    }
                }
            }
        }
    }
}
