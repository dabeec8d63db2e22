macro_rules! test_cases {
    ($variant:ident) => {
        mod $variant {
            mod session {
                mod compress {
                    use crate::utils::{
                        algos::$variant::{session, sync},
                        patterned, random, Error, InputStream, Level, INCREMENT,
                    };

                    #[test]
                    #[ntest::timeout(1000)]
                    fn empty() {
                        let compressed = session::compress(&InputStream::from(vec![]));
                        assert!(!compressed.is_empty());

                        let output = sync::decompress(&compressed);
                        assert_eq!(output, &[][..]);
                    }

                    #[test]
                    #[ntest::timeout(1000)]
                    fn empty_chunk() {
                        let input = InputStream::from(vec![vec![]]);

                        let compressed = session::compress(&input);
                        let output = sync::decompress(&compressed);

                        assert_eq!(output, input.bytes());
                    }

                    #[test]
                    #[ntest::timeout(1000)]
                    fn short() {
                        let input = InputStream::from([[1, 2, 3], [4, 5, 6]]);

                        let compressed = session::compress(&input);
                        let output = sync::decompress(&compressed);

                        assert_eq!(output, &[1, 2, 3, 4, 5, 6][..]);
                    }

                    #[test]
                    fn long() {
                        let input = InputStream::from(vec![random(32_768), random(32_768)]);

                        let compressed = session::compress(&input);
                        let output = sync::decompress(&compressed);

                        assert_eq!(output, input.bytes());
                    }

                    #[test]
                    fn increment_boundaries() {
                        for &size in &[1, INCREMENT - 1, INCREMENT, INCREMENT + 1, 3 * INCREMENT + 5] {
                            let input = InputStream::from(vec![patterned(size)]);

                            let compressed = session::compress(&input);
                            let output = sync::decompress(&compressed);

                            assert_eq!(output, input.bytes(), "input of {} bytes", size);
                        }
                    }

                    #[test]
                    fn with_level_best() {
                        let input = InputStream::from([[1, 2, 3], [4, 5, 6]]);

                        let compressed = session::compress_with(Level::Best, &input);
                        let output = sync::decompress(&compressed);

                        assert_eq!(output, &[1, 2, 3, 4, 5, 6][..]);
                    }

                    #[test]
                    fn with_level_default() {
                        let input = InputStream::from([[1, 2, 3], [4, 5, 6]]);

                        let compressed = session::compress_with(Level::Default, &input);
                        let output = sync::decompress(&compressed);

                        assert_eq!(output, &[1, 2, 3, 4, 5, 6][..]);
                    }

                    #[test]
                    fn with_level_max() {
                        let config = gzbz2::Config::default().with_level(Level::Precise(u32::max_value()));
                        let mut session = gzbz2::Session::new(gzbz2::Direction::Compress, crate::utils::algos::$variant::ALGORITHM);

                        let error = session.initialize(&config).unwrap_err();
                        assert!(matches!(error, Error::InvalidArgument { .. }));
                        assert!(!error.is_fatal());
                        assert_eq!(session.state(), gzbz2::State::Uninitialized);
                        assert!(session.backend().is_none());
                    }
                }

                mod decompress {
                    use crate::utils::{
                        algos::$variant::{session, sync},
                        patterned, random, BackendErrorKind, InputStream, INCREMENT,
                    };

                    #[test]
                    #[ntest::timeout(1000)]
                    fn empty() {
                        let compressed = sync::compress(&[]);

                        let output = session::decompress(&InputStream::from(vec![compressed]));

                        assert_eq!(output, &[][..]);
                    }

                    #[test]
                    #[ntest::timeout(1000)]
                    fn short() {
                        let compressed = sync::compress(&[1, 2, 3, 4, 5, 6]);

                        let output = session::decompress(&InputStream::from(vec![compressed]));

                        assert_eq!(output, &[1, 2, 3, 4, 5, 6][..]);
                    }

                    #[test]
                    fn long() {
                        let bytes = random(65_536);
                        let compressed = sync::compress(&bytes);

                        let output = session::decompress(&InputStream::from(vec![compressed]));

                        assert_eq!(output, bytes);
                    }

                    #[test]
                    fn expands_past_many_increments() {
                        let bytes = patterned(10 * INCREMENT + 3);
                        let compressed = sync::compress(&bytes);
                        assert!(compressed.len() < INCREMENT);

                        let output = session::decompress(&InputStream::from(vec![compressed]));

                        assert_eq!(output, bytes);
                    }

                    #[test]
                    fn byte_at_a_time() {
                        let bytes = patterned(1000);
                        let compressed = InputStream::from(vec![sync::compress(&bytes)]);

                        let output = session::decompress(&compressed.rechunk(1));

                        assert_eq!(output, bytes);
                    }

                    #[test]
                    #[ntest::timeout(1000)]
                    fn no_input_is_truncated() {
                        let error = session::try_decompress(&InputStream::from(vec![])).unwrap_err();
                        assert_eq!(error.backend_kind(), Some(BackendErrorKind::CorruptData));
                    }

                    #[test]
                    #[ntest::timeout(1000)]
                    fn truncated() {
                        let mut compressed = sync::compress(&patterned(1000));
                        compressed.truncate(compressed.len() - 2);

                        let error = session::try_decompress(&InputStream::from(vec![compressed])).unwrap_err();
                        assert_eq!(error.backend_kind(), Some(BackendErrorKind::CorruptData));
                    }

                    #[test]
                    #[ntest::timeout(1000)]
                    fn trailing_garbage() {
                        let mut compressed = sync::compress(&[1, 2, 3, 4, 5, 6]);
                        compressed.extend_from_slice(&[1, 2, 3]);

                        let error = session::try_decompress(&InputStream::from(vec![compressed])).unwrap_err();
                        assert_eq!(error.backend_kind(), Some(BackendErrorKind::CorruptData));
                    }

                    #[test]
                    #[ntest::timeout(1000)]
                    fn not_compressed() {
                        let input = InputStream::from(vec![b"this was never compressed".to_vec()]);

                        let error = session::try_decompress(&input).unwrap_err();
                        assert_eq!(error.backend_kind(), Some(BackendErrorKind::CorruptData));
                        assert!(error.is_fatal());
                    }
                }
            }

            mod write {
                use crate::utils::{
                    algos::$variant::{sync, write},
                    random, Config, Direction, InputStream,
                };
                use std::io::ErrorKind;

                #[test]
                #[ntest::timeout(1000)]
                fn compress_short() {
                    let input = InputStream::from([[1, 2, 3], [4, 5, 6]]);

                    let compressed = write::compress(&input);
                    let output = sync::decompress(&compressed);

                    assert_eq!(output, &[1, 2, 3, 4, 5, 6][..]);
                }

                #[test]
                fn compress_long() {
                    let input = InputStream::from(vec![random(32_768), random(32_768)]);

                    let compressed = write::compress(&input);
                    let output = sync::decompress(&compressed);

                    assert_eq!(output, input.bytes());
                }

                #[test]
                fn decompress_long() {
                    let bytes = random(65_536);
                    let compressed = InputStream::from(vec![sync::compress(&bytes)]);

                    let output = write::decompress(&compressed.rechunk(1000));

                    assert_eq!(output, bytes);
                }

                #[test]
                #[ntest::timeout(1000)]
                fn decompress_truncated() {
                    let mut compressed = sync::compress(&[1, 2, 3, 4, 5, 6]);
                    compressed.pop();

                    let error = write::run(
                        Direction::Decompress,
                        &Config::default(),
                        &InputStream::from(vec![compressed]),
                    )
                    .unwrap_err();
                    assert_eq!(error.kind(), ErrorKind::InvalidData);
                }
            }
        }
    };
}
