//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use std::fs;

    use wget::mirror::{mirror, FilterEngine, MirrorOptions};
    use wget::Url;

    use crate::common::{session, snapshot, FixtureServer, Route};

    const PAGE: &str = "<html><head><link rel=\"stylesheet\" href=\"/css/site.css\"></head>\
        <body><img src=\"/a/b.png\"><script src=\"js/app.js\"></script></body></html>";

    fn site() -> FixtureServer {
        FixtureServer::start(vec![
            ("/", Route::html(PAGE)),
            ("/css/site.css", Route::bytes("text/css", "body { color: red }")),
            ("/a/b.png", Route::bytes("image/png", vec![0x89, b'P', b'N', b'G'])),
            ("/js/app.js", Route::bytes("application/javascript", "console.log(1)")),
        ])
    }

    fn options(root: &std::path::Path, filter: FilterEngine) -> MirrorOptions {
        MirrorOptions {
            destination: Some(root.to_str().unwrap().to_string()),
            filter,
        }
    }

    #[test]
    fn saves_assets_and_rewrites_references() {
        let server = site();
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("site");
        let url = Url::parse(&server.url("/")).unwrap();

        let report = mirror(&session(), &url, &options(&root, FilterEngine::default())).unwrap();

        assert_eq!(report.rewrite.rewritten, 3);
        assert_eq!(report.index_path, root.join("index.html"));
        assert_eq!(fs::read(root.join("a/b.png")).unwrap(), vec![0x89, b'P', b'N', b'G']);
        assert_eq!(
            fs::read_to_string(root.join("css/site.css")).unwrap(),
            "body { color: red }"
        );
        assert_eq!(
            fs::read_to_string(root.join("js/app.js")).unwrap(),
            "console.log(1)"
        );

        let index = fs::read_to_string(root.join("index.html")).unwrap();
        assert!(index.contains("<img src=\"a/b.png\">"), "{index}");
        assert!(index.contains("href=\"css/site.css\""), "{index}");
        assert!(index.contains("<script src=\"js/app.js\">"), "{index}");
    }

    #[test]
    fn fetches_in_link_img_script_order() {
        let server = site();
        let tmp = tempfile::tempdir().unwrap();
        let url = Url::parse(&server.url("/")).unwrap();

        mirror(&session(), &url, &options(tmp.path(), FilterEngine::default())).unwrap();

        assert_eq!(
            server.requested(),
            vec!["/", "/css/site.css", "/a/b.png", "/js/app.js"]
        );
    }

    #[test]
    fn excluded_path_is_never_requested() {
        let server = site();
        let tmp = tempfile::tempdir().unwrap();
        let url = Url::parse(&server.url("/")).unwrap();
        let filter = FilterEngine::from_lists(Some("/a"), None);

        let report = mirror(&session(), &url, &options(tmp.path(), filter)).unwrap();

        assert_eq!(report.rewrite.filtered, 1);
        assert!(!server.requested().contains(&"/a/b.png".to_string()));
        assert!(!tmp.path().join("a").exists());

        let index = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(index.contains("<img src=\"/a/b.png\">"), "{index}");
        assert!(index.contains("href=\"css/site.css\""), "{index}");
    }

    #[test]
    fn rejected_suffix_is_never_requested() {
        let server = site();
        let tmp = tempfile::tempdir().unwrap();
        let url = Url::parse(&server.url("/")).unwrap();
        let filter = FilterEngine::from_lists(None, Some(".css,.js"));

        let report = mirror(&session(), &url, &options(tmp.path(), filter)).unwrap();

        assert_eq!(report.rewrite.filtered, 2);
        assert_eq!(report.rewrite.rewritten, 1);
        assert_eq!(server.requested(), vec!["/", "/a/b.png"]);

        let index = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(index.contains("href=\"/css/site.css\""), "{index}");
        assert!(index.contains("<script src=\"js/app.js\">"), "{index}");
        assert!(!tmp.path().join("css").exists());
    }

    #[test]
    fn missing_asset_keeps_reference() {
        let server = FixtureServer::start(vec![(
            "/",
            Route::html("<html><body><img src=\"/gone/x.png\"><img src=\"/ok.png\"></body></html>"),
        ), ("/ok.png", Route::bytes("image/png", "png"))]);
        let tmp = tempfile::tempdir().unwrap();
        let url = Url::parse(&server.url("/")).unwrap();

        let report = mirror(&session(), &url, &options(tmp.path(), FilterEngine::default())).unwrap();

        assert_eq!(report.rewrite.failed, 1);
        assert_eq!(report.rewrite.rewritten, 1);
        assert!(!tmp.path().join("gone").exists());

        let index = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(index.contains("<img src=\"/gone/x.png\">"), "{index}");
        assert!(index.contains("<img src=\"ok.png\">"), "{index}");
    }

    #[test]
    fn base_href_is_dropped_from_index() {
        let server = FixtureServer::start(vec![
            (
                "/",
                Route::html("<html><head><base href=\"/static/\"></head><body><img src=\"logo.png\"></body></html>"),
            ),
            ("/static/logo.png", Route::bytes("image/png", "logo")),
        ]);
        let tmp = tempfile::tempdir().unwrap();
        let url = Url::parse(&server.url("/")).unwrap();

        mirror(&session(), &url, &options(tmp.path(), FilterEngine::default())).unwrap();

        let index = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(index.contains("<img src=\"static/logo.png\">"), "{index}");
        assert!(!index.contains("href="), "{index}");
        assert_eq!(fs::read_to_string(tmp.path().join("static/logo.png")).unwrap(), "logo");
    }

    #[test]
    fn mirroring_twice_is_byte_identical() {
        let server = site();
        let tmp = tempfile::tempdir().unwrap();
        let url = Url::parse(&server.url("/")).unwrap();
        let opts = options(tmp.path(), FilterEngine::default());

        mirror(&session(), &url, &opts).unwrap();
        let first = snapshot(tmp.path());
        mirror(&session(), &url, &opts).unwrap();
        let second = snapshot(tmp.path());

        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use std::fs;

    use wget::mirror::{mirror, AssetFetcher, HttpFetcher, MirrorOptions, PathMapper};
    use wget::{Url, WgetError};

    use crate::common::{session, unreachable_url, FixtureServer, Route};

    #[test]
    fn truncated_asset_leaves_no_file() {
        let server = FixtureServer::start(vec![("/a/big.bin", Route::truncated(vec![1u8; 5000], 100_000))]);
        let tmp = tempfile::tempdir().unwrap();
        let target = PathMapper::new(tmp.path()).map(&Url::parse(&server.url("/a/big.bin")).unwrap());

        let session = session();
        let outcome = HttpFetcher::new(&session).fetch(&target);

        assert!(!outcome.is_saved());
        assert!(!target.local_path().exists());
    }

    #[test]
    fn truncated_asset_keeps_reference() {
        let server = FixtureServer::start(vec![
            ("/", Route::html("<html><body><img src=\"/a/big.bin\"></body></html>")),
            ("/a/big.bin", Route::truncated(vec![1u8; 5000], 100_000)),
        ]);
        let tmp = tempfile::tempdir().unwrap();
        let url = Url::parse(&server.url("/")).unwrap();
        let options = MirrorOptions {
            destination: Some(tmp.path().to_str().unwrap().to_string()),
            ..Default::default()
        };

        let report = mirror(&session(), &url, &options).unwrap();

        assert_eq!(report.rewrite.failed, 1);
        assert!(!tmp.path().join("a/big.bin").exists());
        let index = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(index.contains("<img src=\"/a/big.bin\">"), "{index}");
    }

    #[test]
    fn root_page_404_writes_no_index() {
        let server = FixtureServer::start(vec![("/", Route::status(404))]);
        let tmp = tempfile::tempdir().unwrap();
        let url = Url::parse(&server.url("/")).unwrap();
        let options = MirrorOptions {
            destination: Some(tmp.path().to_str().unwrap().to_string()),
            ..Default::default()
        };

        let result = mirror(&session(), &url, &options);

        assert!(matches!(result, Err(WgetError::Status { status, .. }) if status.as_u16() == 404));
        assert!(!tmp.path().join("index.html").exists());
        assert_eq!(server.requested(), vec!["/"]);
    }

    #[test]
    fn unreachable_root_is_a_network_error() {
        let tmp = tempfile::tempdir().unwrap();
        let url = Url::parse(&unreachable_url()).unwrap();
        let options = MirrorOptions {
            destination: Some(tmp.path().to_str().unwrap().to_string()),
            ..Default::default()
        };

        let err = mirror(&session(), &url, &options).unwrap_err();

        assert!(matches!(err, WgetError::Transport { .. }), "{err}");
        assert!(!tmp.path().join("index.html").exists());
    }
}
