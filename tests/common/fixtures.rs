//! On-disk dataset fixtures

use anyhow::Result;
use moodtrack::catalog::load_catalog;
use moodtrack::features::RandomFeatureProvider;
use moodtrack::recommend::{Recommender, RecommenderSettings};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Artist names in dataset order.
#[allow(dead_code)]
pub const ARTIST_NAMES: [&str; 7] = [
    "Air",
    "Massive Attack",
    "Slayer",
    "Metallica",
    "Röyksopp",
    "Air Supply",
    "Untagged Artist",
];

/// The artist whose name is stored as Latin-1 bytes.
#[allow(dead_code)]
pub const LATIN1_ARTIST: &str = "Röyksopp";

/// Creates a temporary dataset directory with 7 artists and 12 tags.
///
/// "Untagged Artist" has no tagging events, and one event points to a tag
/// id missing from tags.dat.
pub fn create_test_dataset() -> Result<TempDir> {
    let dir = TempDir::new()?;
    let path = dir.path();

    let mut artists: Vec<u8> = b"id\tname\turl\tpictureURL\n".to_vec();
    artists.extend_from_slice(b"1\tAir\thttp://www.last.fm/music/Air\thttp://img/1.jpg\n");
    artists.extend_from_slice(
        b"2\tMassive Attack\thttp://www.last.fm/music/Massive+Attack\thttp://img/2.jpg\n",
    );
    artists.extend_from_slice(b"3\tSlayer\thttp://www.last.fm/music/Slayer\thttp://img/3.jpg\n");
    artists
        .extend_from_slice(b"4\tMetallica\thttp://www.last.fm/music/Metallica\thttp://img/4.jpg\n");
    // "Röyksopp" in Latin-1
    artists.extend_from_slice(b"5\tR\xf6yksopp\thttp://www.last.fm/music/R%C3%B6yksopp\t\n");
    artists.extend_from_slice(
        b"6\tAir Supply\thttp://www.last.fm/music/Air+Supply\thttp://img/6.jpg\n",
    );
    artists.extend_from_slice(
        b"7\tUntagged Artist\thttp://www.last.fm/music/Untagged+Artist\thttp://img/7.jpg\n",
    );
    fs::write(path.join("artists.dat"), artists)?;

    fs::write(
        path.join("user_artists.dat"),
        "userID\tartistID\tweight\n2\t1\t13883\n2\t3\t11690\n3\t5\t842\n",
    )?;

    fs::write(
        path.join("tags.dat"),
        "tagID\ttagValue\n\
         1\tchillout\n\
         2\telectronic\n\
         3\tambient\n\
         4\ttrip-hop\n\
         5\tthrash metal\n\
         6\tmetal\n\
         7\taggressive\n\
         8\theavy metal\n\
         9\tsoft rock\n\
         10\tlove songs\n\
         11\tromantic\n\
         12\thappy\n",
    )?;

    fs::write(
        path.join("user_taggedartists.dat"),
        "userID\tartistID\ttagID\tday\tmonth\tyear\n\
         2\t1\t1\t1\t4\t2009\n\
         2\t1\t2\t1\t4\t2009\n\
         3\t1\t3\t1\t5\t2009\n\
         2\t2\t4\t1\t4\t2009\n\
         2\t2\t1\t1\t4\t2009\n\
         3\t2\t2\t1\t5\t2009\n\
         2\t3\t5\t1\t4\t2009\n\
         2\t3\t6\t1\t4\t2009\n\
         3\t3\t7\t1\t5\t2009\n\
         2\t4\t6\t1\t4\t2009\n\
         3\t4\t8\t1\t5\t2009\n\
         2\t5\t2\t1\t4\t2009\n\
         2\t5\t1\t1\t4\t2009\n\
         2\t5\t12\t1\t4\t2009\n\
         2\t6\t9\t1\t4\t2009\n\
         2\t6\t10\t1\t4\t2009\n\
         3\t6\t11\t1\t5\t2009\n\
         3\t6\t404\t1\t5\t2009\n",
    )?;

    Ok(dir)
}

/// Writes a MusicCaps-shaped CSV next to the dataset and returns its path.
#[allow(dead_code)]
pub fn create_test_captions(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("musiccaps-public.csv");
    fs::write(
        &path,
        "ytid,start_s,end_s,audioset_positive_labels,aspect_list,caption,author_id,is_balanced_subset,is_audioset_eval\n\
         -0Gj8-vB1q4,30,40,\"/m/0140xf\",\"['low quality', 'sustained strings melody', 'romantic']\",A string melody,4,False,True\n\
         -0SdAVK79lg,30,40,\"/m/0155w\",\"['guitar song', 'happy', 'upbeat']\",An upbeat guitar,0,False,False\n\
         -0vPFx-wRRI,30,40,\"/m/025_jnm\",\"['Happy Birthday', 'piano']\",A birthday song,6,False,True\n",
    )?;
    Ok(path)
}

/// Loads the fixture dataset and wraps it in a recommender.
pub fn build_recommender(
    dir: &Path,
    seed: u64,
    mood_jitter: f64,
) -> Result<Recommender> {
    let mut features = RandomFeatureProvider::seeded(seed);
    let catalog = load_catalog(dir, "http://unused.invalid/dataset.zip", false, &mut features)?;
    let settings = RecommenderSettings {
        mood_jitter,
        seed: Some(seed),
        ..RecommenderSettings::default()
    };
    Ok(Recommender::new(catalog, settings))
}
