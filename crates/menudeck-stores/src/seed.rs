//! Chain store directory used to seed the in-memory repository

use crate::repository::StoreRecord;
use menudeck_model::StoreChannelState;

/// `(id, name, address, delivery, takeaway, curbside)`
const STORES: &[(&str, &str, &str, bool, bool, bool)] = &[
    ("pavilion", "Pavilion KL", "168, Jalan Bukit Bintang, 55100 Kuala Lumpur", true, true, true),
    ("midvalley", "Mid Valley Megamall", "Lingkaran Syed Putra, 59200 Kuala Lumpur", true, true, true),
    ("1utama", "1 Utama Shopping Centre", "1, Lebuh Bandar Utama, 47800 Petaling Jaya", true, true, true),
    ("klcc", "Suria KLCC", "Kuala Lumpur City Centre, 50088 Kuala Lumpur", true, true, true),
    ("sunway", "Sunway Pyramid", "3, Jalan PJS 11/15, 47500 Subang Jaya", true, true, true),
    ("ioi", "IOI City Mall", "Lebuh IRC, IOI Resort, 62502 Putrajaya", true, true, true),
    ("thecurve", "The Curve", "Mutiara Damansara, 47800 Petaling Jaya", true, true, true),
    ("sunwayvelocity", "Sunway Velocity Mall", "Lingkaran SV, 55100 Kuala Lumpur", true, true, true),
    ("paradigm", "Paradigm Mall", "1, Jalan SS 7/26A, 47301 Petaling Jaya", true, true, true),
    ("tropicana", "Tropicana City Mall", "3, Jalan SS 20/27, 47400 Petaling Jaya", false, true, true),
    ("bangsarvillage", "Bangsar Village", "Jalan Telawi 1, Bangsar Baru, 59100 Kuala Lumpur", true, true, true),
    ("nusentral", "NU Sentral", "201, Jalan Tun Sambanthan, 50470 Kuala Lumpur", true, true, true),
    ("quilcity", "Quill City Mall", "1018, Jalan Sultan Ismail, 50250 Kuala Lumpur", true, true, true),
    ("berjayatimes", "Berjaya Times Square", "1, Jalan Imbi, 55100 Kuala Lumpur", true, true, true),
    ("setiacitymall", "Setia City Mall", "Persiaran Setia Dagang, Setia Alam, 40170 Shah Alam", true, true, true),
    ("alamcentral", "Alam Central", "Jalan Majlis, Seksyen 14, 40000 Shah Alam", true, true, true),
    ("empire", "Empire Shopping Gallery", "Jalan SS 16/1, 47500 Subang Jaya", true, true, true),
    ("subangparade", "Subang Parade", "5, Jalan SS 16/1, 47500 Subang Jaya", false, true, true),
    ("dpulze", "Dpulze Cyberjaya", "Persiaran Multimedia, 63000 Cyberjaya", true, true, true),
    ("ioimallpuchong", "IOI Mall Puchong", "Bdr Puchong Jaya, 47100 Puchong", true, true, true),
    ("setapak", "Setapak Central", "Jalan Danau Niaga 1, Taman Danau Kota, 53300 Kuala Lumpur", true, true, true),
    ("ampwalk", "Ampang Point", "Jalan Mamanda 3, Taman Dato Ahmad Razali, 68000 Ampang", true, true, true),
    ("mytown", "MyTOWN Shopping Centre", "6, Jalan Cochrane, 55100 Cheras", true, true, true),
    ("thegardens", "The Gardens Mall", "Lingkaran Syed Putra, 59200 Kuala Lumpur", true, true, true),
    ("tamarind", "Tamarind Square", "Persiaran Multimedia, 63000 Cyberjaya", false, true, true),
];

/// Every chain store with its initial channel switches
#[must_use]
pub fn chain_stores() -> Vec<(StoreRecord, StoreChannelState)> {
    STORES
        .iter()
        .map(|&(id, name, address, delivery, takeaway, curbside)| {
            (
                StoreRecord::new(id, name, address),
                StoreChannelState::new(delivery, takeaway, curbside),
            )
        })
        .collect()
}
