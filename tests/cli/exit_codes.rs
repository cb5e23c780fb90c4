//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use std::fs;

    use assert_cmd::Command;

    use crate::common::{FixtureServer, Route};

    fn wget() -> Command {
        let mut cmd = Command::cargo_bin("wget").unwrap();
        cmd.env_remove("RUST_LOG").env_remove("WGET_LOG_LEVEL");
        cmd
    }

    #[test]
    fn single_file() {
        let server = FixtureServer::start(vec![("/hello.txt", Route::bytes("text/plain", "hello"))]);
        let tmp = tempfile::tempdir().unwrap();

        let out = wget()
            .current_dir(tmp.path())
            .args([server.url("/hello.txt").as_str(), "-O", "greeting.txt"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("start at: "), "{out}");
        assert!(out.contains("sending request, awaiting response... 200 [ OK ]"), "{out}");
        assert!(out.contains("content size: 5 [~0.00 MB]"), "{out}");
        assert!(out.contains(&format!("Downloaded [{}]", server.url("/hello.txt"))), "{out}");
        assert_eq!(fs::read_to_string(tmp.path().join("greeting.txt")).unwrap(), "hello");
    }

    #[test]
    fn quiet_hides_report() {
        let server = FixtureServer::start(vec![("/hello.txt", Route::bytes("text/plain", "hello"))]);
        let tmp = tempfile::tempdir().unwrap();

        let out = wget()
            .current_dir(tmp.path())
            .args(["-q", server.url("/hello.txt").as_str()])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        assert!(!String::from_utf8(out).unwrap().contains("start at"));
        assert!(tmp.path().join("hello.txt").exists());
    }

    #[test]
    fn background_writes_log_file() {
        let server = FixtureServer::start(vec![("/hello.txt", Route::bytes("text/plain", "hello"))]);
        let tmp = tempfile::tempdir().unwrap();

        let out = wget()
            .current_dir(tmp.path())
            .args(["-B", server.url("/hello.txt").as_str()])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(out.trim(), "Output will be written to \"wget-log\".");
        let log = fs::read_to_string(tmp.path().join("wget-log")).unwrap();
        assert!(log.contains("Downloaded ["), "{log}");
    }

    #[test]
    fn mirror_with_destination() {
        let server = FixtureServer::start(vec![
            ("/", Route::html("<html><body><img src=\"/img/logo.png\"></body></html>")),
            ("/img/logo.png", Route::bytes("image/png", "png")),
        ]);
        let tmp = tempfile::tempdir().unwrap();

        wget()
            .current_dir(tmp.path())
            .args(["--mirror", server.url("/").as_str(), "-P", "site"])
            .assert()
            .success();

        let index = fs::read_to_string(tmp.path().join("site/index.html")).unwrap();
        assert!(index.contains("<img src=\"img/logo.png\">"), "{index}");
        assert!(tmp.path().join("site/img/logo.png").exists());
    }

    #[test]
    fn mirror_root_defaults_to_host() {
        let server = FixtureServer::start(vec![("/", Route::html("<p>hi</p>"))]);
        let tmp = tempfile::tempdir().unwrap();

        wget()
            .current_dir(tmp.path())
            .args(["--mirror", server.url("/").as_str()])
            .assert()
            .success();

        assert!(tmp.path().join(server.location()).join("index.html").exists());
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

    use assert_cmd::Command;

    use crate::common::{FixtureServer, Route};

    fn wget() -> Command {
        let mut cmd = Command::cargo_bin("wget").unwrap();
        cmd.env_remove("RUST_LOG").env_remove("WGET_LOG_LEVEL");
        cmd
    }

    #[test]
    fn no_arguments() {
        wget().assert().code(2);
    }

    #[test]
    fn mirror_without_url() {
        let tmp = tempfile::tempdir().unwrap();
        let list = tmp.path().join("urls.txt");
        fs::write(&list, "").unwrap();

        wget()
            .args(["--mirror", "-i", list.to_str().unwrap()])
            .assert()
            .code(2);
    }

    #[test]
    fn invalid_environment_value() {
        wget()
            .env("WGET_TIMEOUT", "forever")
            .arg("http://127.0.0.1:9/")
            .assert()
            .code(2);
    }

    #[test]
    fn not_found() {
        let server = FixtureServer::start(vec![]);
        let tmp = tempfile::tempdir().unwrap();

        wget()
            .current_dir(tmp.path())
            .arg(server.url("/missing.bin"))
            .assert()
            .code(1);

        assert!(!tmp.path().join("missing.bin").exists());
    }

    #[test]
    fn batch_with_failure() {
        let server = FixtureServer::start(vec![("/ok.txt", Route::bytes("text/plain", "ok"))]);
        let tmp = tempfile::tempdir().unwrap();
        let list = tmp.path().join("urls.txt");
        fs::write(
            &list,
            format!("{}\n{}\n", server.url("/gone.txt"), server.url("/ok.txt")),
        )
        .unwrap();

        wget()
            .current_dir(tmp.path())
            .args(["-i", list.to_str().unwrap()])
            .assert()
            .code(1);

        assert_eq!(fs::read_to_string(tmp.path().join("ok.txt")).unwrap(), "ok");
    }

    #[test]
    fn mirror_root_not_found() {
        let server = FixtureServer::start(vec![]);
        let tmp = tempfile::tempdir().unwrap();

        wget()
            .current_dir(tmp.path())
            .args(["--mirror", server.url("/").as_str(), "-P", "site"])
            .assert()
            .code(1);

        assert!(!tmp.path().join("site/index.html").exists());
    }
}
