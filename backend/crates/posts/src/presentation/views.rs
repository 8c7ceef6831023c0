//! Profile, feed and post pages

use kernel::id::PostId;
use maud::{Markup, display, html};
use platform::flash::Flash;
use platform::html::{Nav, layout};

use crate::domain::entity::post::Post;

fn nav(user_name: &str) -> Nav<'_> {
    Nav::SignedIn { user_name }
}

fn post_card(post: &Post) -> Markup {
    html! {
        li class="post-card" {
            a href={ "/post/" (display(&post.post_id)) } {
                img src=(post.image_url) alt=(post.title);
            }
            h3 { (post.title) }
            span { (post.likes) " likes" }
        }
    }
}

fn post_list(posts: &[Post]) -> Markup {
    html! {
        @if posts.is_empty() {
            p { "No posts yet." }
        } @else {
            ul class="posts" {
                @for post in posts {
                    (post_card(post))
                }
            }
        }
    }
}

pub fn profile_page(user_name: &str, email: &str, posts: &[Post], flash: Option<&Flash>) -> String {
    let body = html! {
        section class="profile" {
            h1 { (user_name) }
            p { (email) }
        }
        section class="new-post" {
            h2 { "Add a post" }
            form action="/post" method="POST" enctype="multipart/form-data" {
                label for="title" { "Title" }
                input type="text" id="title" name="title";
                label for="caption" { "Caption" }
                textarea id="caption" name="caption" {}
                label for="file" { "Image" }
                input type="file" id="file" name="file" accept=".jpg,.jpeg,.png,.gif,.webp";
                button type="submit" { "Submit" }
            }
        }
        section {
            (post_list(posts))
        }
    };

    layout("Profile", nav(user_name), flash, body)
}

pub fn feed_page(user_name: &str, posts: &[Post], flash: Option<&Flash>) -> String {
    let body = html! {
        h1 { "Feed" }
        (post_list(posts))
    };
    layout("Feed", nav(user_name), flash, body)
}

pub fn post_page(user_name: &str, post: &Post, is_owner: bool, flash: Option<&Flash>) -> String {
    let body = html! {
        article class="post" {
            h1 { (post.title) }
            img src=(post.image_url) alt=(post.title);
            p { (post.caption) }
            p { "Likes: " (post.likes) }
            form action={ "/post/" (display(&post.post_id)) "/like" } method="POST" {
                button type="submit" { "Like" }
            }
            @if is_owner {
                form action={ "/post/" (display(&post.post_id)) "/delete" } method="POST" {
                    button type="submit" { "Delete" }
                }
            }
            a href="/profile" { "Return to Profile" } " "
            a href="/feed" { "Return to Feed" }
        }
    };

    layout(&post.title, nav(user_name), flash, body)
}

pub fn not_found_page(user_name: &str, post_id: Option<&PostId>) -> String {
    let body = html! {
        h1 { "Post not found" }
        @if let Some(id) = post_id {
            p { "No post with id " (display(id)) "." }
        }
        a href="/feed" { "Return to Feed" }
    };
    layout("Post not found", nav(user_name), None, body)
}
