use crate::extract::links::{absolutize, classify, collect_hrefs, host_of, inline_scripts};

const PAGE: &str = "http://quiz.test/q1";

#[cfg(test)]
mod href_tests {
    use super::*;

    #[test]
    fn test_hrefs_are_absolutized_against_the_page() {
        let html = r#"<html><body>
            <a href="/files/data.csv">data</a>
            <a href="next.html">next</a>
            <a href="http://other.example/page">elsewhere</a>
        </body></html>"#;

        let hrefs = collect_hrefs(html, PAGE);
        assert_eq!(
            hrefs,
            vec![
                "http://quiz.test/files/data.csv",
                "http://quiz.test/next.html",
                "http://other.example/page",
            ]
        );
    }

    #[test]
    fn test_empty_hrefs_are_skipped() {
        let html = r#"<html><body><a href="">nowhere</a><a>unlinked</a></body></html>"#;
        assert!(collect_hrefs(html, PAGE).is_empty());
    }

    #[test]
    fn test_absolutize_falls_back_to_the_verbatim_candidate() {
        assert_eq!(absolutize("not a url", "/submit"), "/submit");
    }

    #[test]
    fn test_host_of_keeps_the_port() {
        assert_eq!(host_of("http://quiz.test:8080/q1"), Some("quiz.test:8080"));
        assert_eq!(host_of("https://quiz.test/deep/path"), Some("quiz.test"));
        assert_eq!(host_of("no scheme here"), None);
    }
}

#[cfg(test)]
mod classify_tests {
    use super::*;

    #[test]
    fn test_extension_buckets() {
        let hrefs: Vec<String> = [
            "http://x/report.pdf",
            "http://x/data.csv",
            "http://x/clip.mp3",
            "http://x/voice.opus",
            "http://x/tone.wav",
            "http://x/chart.png",
            "http://x/photo.JPEG",
            "http://x/page.html",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let buckets = classify(&hrefs, "", PAGE);
        assert_eq!(buckets.pdf, vec!["http://x/report.pdf"]);
        assert_eq!(buckets.csv, vec!["http://x/data.csv"]);
        assert_eq!(
            buckets.audio,
            vec!["http://x/clip.mp3", "http://x/voice.opus", "http://x/tone.wav"]
        );
        assert_eq!(
            buckets.image,
            vec!["http://x/chart.png", "http://x/photo.JPEG"]
        );
    }

    #[test]
    fn test_pdf_and_audio_matching_is_case_sensitive() {
        let hrefs: Vec<String> = ["http://x/report.PDF", "http://x/clip.MP3"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        // Upper-cased PDF/audio extensions match no bucket at all
        let buckets = classify(&hrefs, "", PAGE);
        assert!(buckets.pdf.is_empty());
        assert!(buckets.audio.is_empty());
        assert!(buckets.image.is_empty());
    }

    #[test]
    fn test_audio_and_img_tags_merge_into_the_buckets() {
        let html = r#"<html><body>
            <audio src="/media/clip.mp3"></audio>
            <img src="/img/chart.png">
            <img src="data:image/png;base64,AAAA">
        </body></html>"#;

        let buckets = classify(&[], html, PAGE);
        assert_eq!(buckets.audio, vec!["http://quiz.test/media/clip.mp3"]);
        assert_eq!(
            buckets.image,
            vec![
                "http://quiz.test/img/chart.png",
                "data:image/png;base64,AAAA",
            ]
        );
    }

    #[test]
    fn test_css_url_references_join_the_image_bucket() {
        let html = r#"<html><body>
            <div style="background: url('/img/bg.jpg')"></div>
            <div style="background-image: url(textures/far.png)"></div>
        </body></html>"#;

        let buckets = classify(&[], html, PAGE);
        assert_eq!(
            buckets.image,
            vec![
                "http://quiz.test/img/bg.jpg",
                "http://quiz.test/textures/far.png",
            ]
        );
    }

    #[test]
    fn test_href_images_come_before_tag_and_css_images() {
        let hrefs = vec!["http://x/linked.png".to_string()];
        let html = r#"<html><body>
            <img src="/img/tagged.png">
            <div style="background: url(/img/styled.png)"></div>
        </body></html>"#;

        let buckets = classify(&hrefs, html, PAGE);
        assert_eq!(
            buckets.image,
            vec![
                "http://x/linked.png",
                "http://quiz.test/img/tagged.png",
                "http://quiz.test/img/styled.png",
            ]
        );
    }
}

#[cfg(test)]
mod script_tests {
    use super::*;

    #[test]
    fn test_only_inline_scripts_are_collected() {
        let html = r#"<html><body>
            <script>var answer = 42;</script>
            <script src="/app.js"></script>
            <script>console.log("second");</script>
        </body></html>"#;

        let scripts = inline_scripts(html);
        assert_eq!(scripts.len(), 2);
        assert!(scripts[0].contains("var answer = 42;"));
        assert!(scripts[1].contains("second"));
    }

    #[test]
    fn test_page_without_scripts_yields_nothing() {
        assert!(inline_scripts("<html><body><p>quiet</p></body></html>").is_empty());
    }
}
