use chrono::{Duration, TimeZone, Utc};
use rand::Rng;

const NUM_USERS: usize = 5;

const NUM_POSTS: usize = 8;
const POST_TITLE_WORDS: usize = 6;
const POST_CONTENT_WORDS: usize = 40;

const NUM_COMMENTS: usize = 60;
const COMMENT_WORDS: usize = 15;
// Roughly this share of comments replies to an earlier comment on its post
const REPLY_RATIO: f64 = 0.6;

fn gen_n_items(table: &str, n: usize, mut f: impl FnMut(usize) -> String) {
    println!("INSERT INTO {} VALUES", table);
    for i in 0..n {
        if i != 0 {
            println!(",");
        }
        print!("    {}", f(i));
    }
    println!();
    println!("ON CONFLICT DO NOTHING;");
}

fn quoted(words: usize) -> String {
    lipsum::lipsum_words(words).replace('\'', "''")
}

struct GenComment {
    post: usize,
    parent: Option<usize>,
    author: usize,
}

fn main() {
    let mut rng = rand::thread_rng();
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();

    // Decide comment placement up front so the post rows can carry accurate
    // comment counts. Comments are assigned ids in ascending creation order,
    // so a reply always names a parent that predates it.
    let mut comments_per_post = vec![Vec::new(); NUM_POSTS];
    let comments = (0..NUM_COMMENTS)
        .map(|i| {
            let id = i + 1;
            let post = rng.gen_range(0..NUM_POSTS);
            let earlier = &comments_per_post[post];
            let parent = match !earlier.is_empty() && rng.gen_bool(REPLY_RATIO) {
                true => Some(earlier[rng.gen_range(0..earlier.len())]),
                false => None,
            };
            comments_per_post[post].push(id);
            GenComment {
                post,
                parent,
                author: rng.gen_range(0..NUM_USERS),
            }
        })
        .collect::<Vec<_>>();

    gen_n_items("posts", NUM_POSTS, |i| {
        let created = start + Duration::hours(i as i64);
        format!(
            "({}, '{}', '{}', 'https://example.org/post-images/{}.png', '{}', NULL, {}, {})",
            i + 1,
            quoted(POST_TITLE_WORDS),
            quoted(POST_CONTENT_WORDS),
            i + 1,
            created.to_rfc3339(),
            rng.gen_range(0..50),
            comments_per_post[i].len(),
        )
    });

    gen_n_items("comments", NUM_COMMENTS, |i| {
        let c = &comments[i];
        let parent = match c.parent {
            Some(p) => format!("{}", p),
            None => String::from("NULL"),
        };
        let created = start + Duration::days(1) + Duration::minutes(i as i64);
        format!(
            "({}, {}, {}, '{}', '00000000-0000-0000-0000-{:012}', 'user{}', '{}')",
            i + 1,
            c.post + 1,
            parent,
            quoted(COMMENT_WORDS),
            c.author + 1,
            c.author + 1,
            created.to_rfc3339(),
        )
    });
}
