//! Folder trees shared by discovery tests
//!
//! Every tree sits on the `home::user` storage unless stated otherwise and
//! holds JPEG images only.

use crate::mocks::{MockFile, MockFolder};
use gallery_core::FileId;

/// Storage id of a WebDAV mount
pub const WEBDAV_STORAGE: &str = "webdav::user@domain.com/dav";

/// Readable folder holding one JPEG per id
pub fn jpeg_folder(id: FileId, file_ids: &[FileId]) -> MockFolder {
    MockFolder::new(id).with_files(file_ids.iter().map(|&file_id| MockFile::jpeg(file_id)))
}

/// The three JPEGs placed directly in most test roots
pub fn root_files() -> Vec<MockFile> {
    [77777, 88888, 99999].into_iter().map(MockFile::jpeg).collect()
}

/// First album: three images
pub fn album_one() -> MockFolder {
    jpeg_folder(545454, &[11111, 22222, 33333])
}

/// Second album: three images
pub fn album_two() -> MockFolder {
    jpeg_folder(767676, &[44444, 55555, 66666])
}

/// Two readable albums of three images plus three root images
pub fn two_albums_and_three_files() -> MockFolder {
    MockFolder::new(909090)
        .with_folder(album_one())
        .with_folder(album_two())
        .with_files(root_files())
}

/// An album with two images and a `.nomedia` marker, plus three root images
pub fn blacklisted_album_and_three_files() -> MockFolder {
    let blacklisted = MockFolder::new(987234)
        .with_file(MockFile::jpeg(998877))
        .with_file(MockFile::jpeg(998876))
        .with_file(MockFile::nomedia(998875));

    MockFolder::new(909090)
        .with_folder(blacklisted)
        .with_files(root_files())
}

/// A local album, an album on a WebDAV mount, and three root images
pub fn local_and_external_albums() -> MockFolder {
    let external = jpeg_folder(545455, &[11112]).external(WEBDAV_STORAGE);

    MockFolder::new(909090)
        .with_folder(album_one())
        .with_folder(external)
        .with_files(root_files())
}

/// A folder nesting both albums, plus three root images
pub fn nested_albums_and_three_files() -> MockFolder {
    let nest = MockFolder::new(101010)
        .with_folder(album_one())
        .with_folder(album_two());

    MockFolder::new(909090)
        .with_folder(nest)
        .with_files(root_files())
}
