//! Concurrent presigning through a shared [`Presigner`](s3presign_auth::Presigner).

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use http::Method;
    use s3presign_auth::Presigner;

    use crate::{fixed_instant, test_presigner};

    const THREADS: usize = 8;
    const ITERATIONS: usize = 50;

    fn presign_from_threads(presigner: &Presigner) -> anyhow::Result<Vec<String>> {
        let spec = presigner
            .spec()
            .method(Method::PUT)
            .bucket("bucket")
            .key("uploads/object.bin")
            .signature_duration(Duration::from_secs(900))
            .build()?;

        let urls = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        (0..ITERATIONS)
                            .map(|_| {
                                presigner
                                    .presign_at(&spec, fixed_instant())
                                    .map(|url| url.into_string())
                            })
                            .collect::<Result<Vec<_>, _>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("presign thread panicked"))
                .collect::<Result<Vec<_>, _>>()
        })?;

        Ok(urls.into_iter().flatten().collect())
    }

    #[test]
    fn test_should_presign_identically_across_threads() -> anyhow::Result<()> {
        let presigner = test_presigner("eu-west-1");
        let urls = presign_from_threads(&presigner)?;

        assert_eq!(urls.len(), THREADS * ITERATIONS);
        assert!(urls.iter().all(|url| url == &urls[0]));
        Ok(())
    }

    #[test]
    fn test_should_share_signing_key_cache_across_threads() -> anyhow::Result<()> {
        let uncached = presign_from_threads(&test_presigner("eu-west-1"))?;
        let presigner = test_presigner("eu-west-1").with_signing_key_cache();
        let cached = presign_from_threads(&presigner)?;

        assert!(cached.iter().all(|url| url == &uncached[0]));
        assert_eq!(presigner.signing_key_cache().map(|c| c.len()), Some(1));
        Ok(())
    }
}
