//! Output helpers for binaries.

/// Create a directory and all of its parents if they don't already exist,
/// panicking on failure.
#[macro_export]
macro_rules! mkdir {
    ( $dir:expr ) => {
        {
            let dir = std::path::PathBuf::from(&$dir);
            if !dir.is_dir() {
                println!(":: mkdir -p {}", dir.display());
                std::fs::create_dir_all(&dir)
                    .unwrap_or_else(|e| {
                        panic!("couldn't create {}: {}", dir.display(), e)
                    });
            }
        }
    }
}

/// Write a collection of named arrays to a `.npz` file, returning a
/// `Cos2PhiResult<()>`.
///
/// ```ignore
/// write_npz!(
///     outdir.join("data.npz"),
///     arrays: {
///         "x" => &x,
///         "y" => &y,
///     }
/// )?;
/// ```
#[macro_export]
macro_rules! write_npz {
    (
        $filename:expr,
        arrays: { $( $name:expr => $arr:expr ),+ $(,)? }
    ) => {
        (|| -> $crate::error::Cos2PhiResult<()> {
            let path: std::path::PathBuf = $filename.into();
            let mut npz = ndarray_npy::NpzWriter::new(std::fs::File::create(&path)?);
            $(
                npz.add_array($name, $arr)?;
            )+
            npz.finish()?;
            println!(":: wrote {}", path.display());
            Ok(())
        })()
    }
}
