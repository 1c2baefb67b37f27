//! End-to-end exercises of the comment-thread engine against the mock store.

#[cfg(test)]
mod tests {
    use sureddo_api::{
        Comment, CommentId, Error, MediaStore, NewComment, NewPost, PostId, Store, User, UserId,
    };
    use sureddo_client::{Session, SubmissionState, ThreadState};
    use sureddo_mock_server::MockServer;

    fn session_for(name: &str) -> Session {
        Session::logged_in(User {
            id: UserId::stub(),
            name: String::from(name),
        })
    }

    async fn post_with_server() -> (MockServer, PostId) {
        let mut server = MockServer::new();
        let post = server
            .insert_post(NewPost {
                title: String::from("First post"),
                content: String::from("Hello from the mock store"),
                image_url: String::from("mock://post-images/first.png"),
            })
            .await
            .expect("failed inserting post");
        (server, post)
    }

    #[tokio::test]
    async fn comments_and_replies_nest_in_submission_order() {
        let (mut server, post) = post_with_server().await;
        let session = session_for("yamanote");
        let mut state = ThreadState::new(post);

        state.composer_mut().set_draft(String::from("first!"));
        state.submit_comment(&mut server, &session).await.unwrap();
        state.composer_mut().set_draft(String::from("second!"));
        state.submit_comment(&mut server, &session).await.unwrap();

        // submit_comment refreshed immediately, no tick needed
        assert_eq!(state.forest().len(), 2);
        let first = state.forest()[0].comment.id;
        assert_eq!(state.forest()[0].comment.content, "first!");
        assert_eq!(state.forest()[1].comment.content, "second!");

        state
            .node_mut(first)
            .set_draft(String::from("  a nested reply  "));
        state.submit_reply(&mut server, &session, first).await.unwrap();

        assert_eq!(state.forest().len(), 2);
        assert_eq!(state.forest()[0].children.len(), 1);
        assert_eq!(state.forest()[0].children[0].comment.content, "a nested reply");
        assert_eq!(
            state.forest()[0].children[0].comment.parent_comment_id,
            Some(first)
        );
        assert_eq!(state.node(first).draft, "");
    }

    #[tokio::test]
    async fn anonymous_reply_never_reaches_the_store() {
        let (mut server, post) = post_with_server().await;
        let session = session_for("yamanote");
        let mut state = ThreadState::new(post);

        state.composer_mut().set_draft(String::from("root"));
        state.submit_comment(&mut server, &session).await.unwrap();
        let root = state.forest()[0].comment.id;
        let inserted_before = server.test_comment_count();

        // the session expired while the reply box was open
        state.node_mut(root).set_draft(String::from("kept draft"));
        let res = state
            .submit_reply(&mut server, &Session::anonymous(), root)
            .await;
        assert_eq!(res, Err(Error::Unauthenticated));
        assert_eq!(server.test_comment_count(), inserted_before);
        assert_eq!(state.node(root).draft, "kept draft");
        assert_eq!(
            state.node(root).submission,
            SubmissionState::Failed(Error::Unauthenticated.to_string())
        );
    }

    #[tokio::test]
    async fn whitespace_draft_never_reaches_the_store() {
        let (mut server, post) = post_with_server().await;
        let session = session_for("yamanote");
        let mut state = ThreadState::new(post);

        state.composer_mut().set_draft(String::from("   "));
        let res = state.submit_comment(&mut server, &session).await;
        assert_eq!(res, Err(Error::EmptyContent));
        assert_eq!(server.test_comment_count(), 0);
    }

    #[tokio::test]
    async fn expanded_threads_survive_polling() {
        let (mut server, post) = post_with_server().await;
        let session = session_for("yamanote");
        let mut state = ThreadState::new(post);

        state.composer_mut().set_draft(String::from("root"));
        state.submit_comment(&mut server, &session).await.unwrap();
        let root = state.forest()[0].comment.id;
        state.node_mut(root).set_draft(String::from("reply"));
        state.submit_reply(&mut server, &session, root).await.unwrap();

        state.node_mut(root).toggle_collapsed();
        assert!(!state.node(root).collapsed);

        // two timer ticks go by
        state.refresh(&mut server).await;
        state.refresh(&mut server).await;
        assert!(!state.node(root).collapsed);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_the_stale_forest() {
        let (mut server, post) = post_with_server().await;
        let session = session_for("yamanote");
        let mut state = ThreadState::new(post);

        state.composer_mut().set_draft(String::from("root"));
        state.submit_comment(&mut server, &session).await.unwrap();
        assert_eq!(state.forest().len(), 1);

        server.test_set_offline(true);
        state.refresh(&mut server).await;
        assert_eq!(state.forest().len(), 1);
        assert!(state.last_error().is_some());

        server.test_set_offline(false);
        state.refresh(&mut server).await;
        assert_eq!(state.last_error(), None);
    }

    #[tokio::test]
    async fn failed_insert_preserves_the_draft() {
        let (mut server, post) = post_with_server().await;
        let session = session_for("yamanote");
        let mut state = ThreadState::new(post);

        state.composer_mut().set_draft(String::from("root"));
        state.submit_comment(&mut server, &session).await.unwrap();
        let root = state.forest()[0].comment.id;

        state.node_mut(root).toggle_composing();
        state.node_mut(root).set_draft(String::from("do not lose me"));
        server.test_set_offline(true);
        let res = state.submit_reply(&mut server, &session, root).await;
        assert!(matches!(res, Err(Error::Insert(_))));
        assert_eq!(state.node(root).draft, "do not lose me");
        assert!(state.node(root).composing);
    }

    #[tokio::test]
    async fn corrupted_records_are_dropped_from_the_tree() {
        let (mut server, post) = post_with_server().await;
        let session = session_for("yamanote");
        let mut state = ThreadState::new(post);

        state.composer_mut().set_draft(String::from("root"));
        state.submit_comment(&mut server, &session).await.unwrap();

        let time = state.forest()[0].comment.created_at;
        server.test_push_comment(Comment {
            id: CommentId(1000),
            post_id: post,
            parent_comment_id: Some(CommentId(999)),
            content: String::from("dangling"),
            author_name: String::from("yamanote"),
            created_at: time + chrono::Duration::seconds(10),
        });
        server.test_push_comment(Comment {
            id: CommentId(1001),
            post_id: post,
            parent_comment_id: Some(CommentId(1001)),
            content: String::from("self-referencing"),
            author_name: String::from("yamanote"),
            created_at: time + chrono::Duration::seconds(20),
        });

        state.refresh(&mut server).await;
        assert_eq!(state.forest().len(), 1);
        assert_eq!(state.forest()[0].children.len(), 0);
    }

    #[tokio::test]
    async fn insert_rejects_unknown_parents() {
        let (mut server, post) = post_with_server().await;
        let res = server
            .insert_comment(NewComment::new(
                post,
                Some(CommentId(12345)),
                String::from("orphan"),
                &User {
                    id: UserId::stub(),
                    name: String::from("yamanote"),
                },
            ))
            .await;
        assert_eq!(res, Err(Error::UnknownParentComment(CommentId(12345))));

        let res = server
            .insert_comment(NewComment::new(
                PostId(999),
                None,
                String::from("no such post"),
                &User {
                    id: UserId::stub(),
                    name: String::from("yamanote"),
                },
            ))
            .await;
        assert_eq!(res, Err(Error::UnknownPost(PostId(999))));
    }

    #[tokio::test]
    async fn replies_to_comments_of_other_posts_are_rejected() {
        let (mut server, post) = post_with_server().await;
        let other = server
            .insert_post(NewPost {
                title: String::from("Second post"),
                content: String::from("Another one"),
                image_url: String::from("mock://post-images/second.png"),
            })
            .await
            .unwrap();
        let session = session_for("yamanote");
        let mut state = ThreadState::new(post);
        state.composer_mut().set_draft(String::from("root"));
        state.submit_comment(&mut server, &session).await.unwrap();
        let root = state.forest()[0].comment.id;

        let res = server
            .insert_comment(NewComment::new(
                other,
                Some(root),
                String::from("cross-post reply"),
                &User {
                    id: UserId::stub(),
                    name: String::from("yamanote"),
                },
            ))
            .await;
        assert_eq!(res, Err(Error::UnknownParentComment(root)));
    }

    #[tokio::test]
    async fn uploaded_image_url_round_trips_through_a_post() {
        let mut server = MockServer::new();
        let url = server
            .store_image("first-123-cat.png", vec![1, 2, 3])
            .await
            .unwrap();
        assert_eq!(url, "mock://post-images/first-123-cat.png");
        assert_eq!(server.test_image_count(), 1);

        let post = server
            .insert_post(NewPost {
                title: String::from("First post"),
                content: String::from("Hello from the mock store"),
                image_url: url.clone(),
            })
            .await
            .unwrap();
        assert_eq!(server.fetch_post(post).await.unwrap().image_url, url);

        let res = server
            .insert_post(NewPost {
                title: String::from("  "),
                content: String::from("untitled"),
                image_url: url,
            })
            .await;
        assert_eq!(res, Err(Error::EmptyContent));
    }

    #[tokio::test]
    async fn comment_counts_follow_inserts() {
        let (mut server, post) = post_with_server().await;
        let session = session_for("yamanote");
        let mut state = ThreadState::new(post);

        state.composer_mut().set_draft(String::from("one"));
        state.submit_comment(&mut server, &session).await.unwrap();
        state.composer_mut().set_draft(String::from("two"));
        state.submit_comment(&mut server, &session).await.unwrap();

        let posts = server.fetch_posts().await.unwrap();
        assert_eq!(posts[0].comment_count, Some(2));
    }
}
