// Unit tests for business rules

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use crate::domain::model::*;
    use crate::domain::rules::*;

    fn sidecars(count: usize) -> Vec<PathBuf> {
        (0..count)
            .map(|i| PathBuf::from(format!("movie_track{}_enhanced.opus", i + 1)))
            .collect()
    }

    #[test]
    fn test_parse_keeps_emission_order() {
        let parse = CatalogParser::parse("1|5.1|eng|Main\n2|7.1|jpn\n4|stereo|fre|Commentary\n");

        assert_eq!(parse.dropped, 0);
        let indices: Vec<&str> = parse.catalog.iter().map(|t| t.index.as_str()).collect();
        assert_eq!(indices, vec!["1", "2", "4"]);

        let first = parse.catalog.get(0).unwrap();
        assert_eq!(first.channel_layout, "5.1");
        assert_eq!(first.language, "eng");
        assert_eq!(first.title, "Main");
        assert_eq!(parse.catalog.get(1).unwrap().title, "");
    }

    #[test]
    fn test_parse_drops_short_rows() {
        let output = "1|5.1|eng\n2|7.1\n\ngarbage\n3|stereo|ger|\n";
        let parse = CatalogParser::parse(output);

        assert_eq!(parse.catalog.len(), 2);
        assert_eq!(parse.dropped, 3);
        assert_eq!(parse.catalog.get(1).unwrap().index, "3");
        assert_eq!(parse.catalog.get(1).unwrap().title, "");
    }

    #[test]
    fn test_parse_keeps_empty_fields() {
        let parse = CatalogParser::parse("7|||\n");
        let track = parse.catalog.get(0).unwrap();
        assert_eq!(track.index, "7");
        assert_eq!(track.channel_layout, "");
        assert_eq!(track.language, "");
        assert_eq!(track.layout_class(), LayoutClass::Default);
    }

    #[test]
    fn test_parse_empty_output() {
        let parse = CatalogParser::parse("");
        assert!(parse.catalog.is_empty());
        assert_eq!(parse.dropped, 0);
    }

    #[test]
    fn test_is_complete_record() {
        assert!(CatalogParser::is_complete_record(&["1", "5.1", "eng"]));
        assert!(CatalogParser::is_complete_record(&["1", "5.1", "eng", "t", "extra"]));
        assert!(!CatalogParser::is_complete_record(&["1", "5.1"]));
        assert!(!CatalogParser::is_complete_record(&[""]));
    }

    #[test]
    fn test_probe_args() {
        let args = InvocationBuilder::probe_args(Path::new("movie.mkv"));
        assert_eq!(
            args,
            vec![
                "-loglevel",
                "error",
                "-select_streams",
                "a",
                "-show_entries",
                "stream=index,channel_layout:stream_tags=language,title",
                "-of",
                "compact=p=0:nk=1",
                "movie.mkv",
            ]
        );
    }

    #[test]
    fn test_transcode_args_seven_one() {
        let track = TrackDescriptor::new("2", "7.1(wide)", "jpn").with_title("Original Title");
        let args = InvocationBuilder::transcode_args(
            Path::new("movie.mkv"),
            &track,
            Path::new("movie_track2_enhanced.opus"),
        );

        assert_eq!(&args[0..4], &["-i", "movie.mkv", "-map", "0:2"]);
        assert_eq!(args[4], "-af");
        assert_eq!(args[5], DownmixMatrix::SEVEN_ONE.filter_graph());
        assert!(args.contains(&"language=jpn".to_string()));
        assert!(args.contains(&"title=2.1 Enhanced".to_string()));
        assert!(!args.iter().any(|a| a.contains("Original Title")));
        assert_eq!(&args[args.len() - 2..], &["-y", "movie_track2_enhanced.opus"]);
    }

    #[test]
    fn test_transcode_args_default_layout() {
        for layout in ["5.1", "", "mono"] {
            let track = TrackDescriptor::new("1", layout, "eng");
            let args = InvocationBuilder::transcode_args(
                Path::new("a.mkv"),
                &track,
                Path::new("a_track1_enhanced.opus"),
            );
            assert_eq!(args[5], DownmixMatrix::DEFAULT.filter_graph());
        }
    }

    #[test]
    fn test_transcode_encoder_settings() {
        let track = TrackDescriptor::new("1", "5.1", "eng");
        let args = InvocationBuilder::transcode_args(
            Path::new("a.mkv"),
            &track,
            Path::new("a_track1_enhanced.opus"),
        );
        let joined = args.join(" ");
        assert!(joined.contains(
            "-acodec libopus -b:a 320k -vbr on -compression_level 9 -frame_duration 20 -application audio"
        ));
    }

    #[test]
    fn test_selectors_without_tracks() {
        assert_eq!(
            RemuxMapper::stream_selectors(0),
            vec![StreamSelector::Video, StreamSelector::OptionalSubtitles]
        );
    }

    #[test]
    fn test_remux_maps_zero_tracks() {
        let args = InvocationBuilder::remux_args(Path::new("m.mkv"), Path::new("o.mkv"), &[]);
        assert_eq!(InvocationBuilder::map_specs(&args), vec!["0:v", "0:s?"]);
        assert_eq!(
            args,
            vec!["-i", "m.mkv", "-map", "0:v", "-map", "0:s?", "-c:v", "copy", "-c:s", "copy", "-y", "o.mkv"]
        );
    }

    #[test]
    fn test_remux_maps_one_track() {
        let args = InvocationBuilder::remux_args(Path::new("m.mkv"), Path::new("o.mkv"), &sidecars(1));
        assert_eq!(
            InvocationBuilder::map_specs(&args),
            vec!["0:v", "0:s?", "0:a:0", "1:a"]
        );
    }

    #[test]
    fn test_remux_interleaves_three_tracks() {
        let inputs = sidecars(3);
        let args = InvocationBuilder::remux_args(Path::new("m.mkv"), Path::new("o.mkv"), &inputs);

        assert_eq!(
            InvocationBuilder::map_specs(&args),
            vec!["0:v", "0:s?", "0:a:0", "1:a", "0:a:1", "2:a", "0:a:2", "3:a"]
        );

        // inputs declared in catalog order right after the original
        let declared: Vec<&str> = args
            .windows(2)
            .filter(|pair| pair[0] == "-i")
            .map(|pair| pair[1].as_str())
            .collect();
        assert_eq!(
            declared,
            vec![
                "m.mkv",
                "movie_track1_enhanced.opus",
                "movie_track2_enhanced.opus",
                "movie_track3_enhanced.opus",
            ]
        );
    }

    #[test]
    fn test_remux_copies_every_audio_map() {
        let args = InvocationBuilder::remux_args(Path::new("m.mkv"), Path::new("o.mkv"), &sidecars(2));
        let joined = args.join(" ");
        assert!(joined.contains("-map 0:a:0 -c:a copy -map 1:a -c:a copy -map 0:a:1 -c:a copy -map 2:a -c:a copy"));
        assert!(joined.ends_with("-c:v copy -c:s copy -y o.mkv"));
    }
}
