use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "smarttani")]
#[command(about = "Catat jadwal siram, pupuk dan panen tanaman Anda")]
pub struct Cli {
    /// ID pengguna pemilik tanaman
    #[arg(long, global = true, env = "SMARTTANI_USER", default_value_t = 1)]
    pub user: i64,

    /// URI MongoDB
    #[arg(
        long,
        global = true,
        env = "MONGO_URI",
        default_value = "mongodb://localhost:27017/smarttani"
    )]
    pub mongo_uri: String,

    /// Nama database
    #[arg(long, global = true, env = "SMARTTANI_DB", default_value = "smarttani")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lihat tanaman beserta status perawatannya
    List {
        /// Hanya tampilkan ID dan nama
        #[arg(long)]
        ids: bool,
    },
    /// Tambah tanaman baru
    Add(AddArgs),
    /// Ubah data tanaman
    Update(UpdateArgs),
    /// Tandai tanaman sudah disiram hari ini
    Water {
        #[arg(long)]
        id: i64,
    },
    /// Tandai tanaman sudah dipupuk hari ini
    Fertilize {
        #[arg(long)]
        id: i64,
    },
    /// Hapus tanaman (tetap tersimpan sebagai terhapus)
    Remove {
        #[arg(long)]
        id: i64,
    },
    /// Tampilkan kalender perawatan
    Calendar(CalendarArgs),
    /// Tampilkan pengingat perawatan
    Notify {
        /// Tampilkan semua pengingat sekaligus
        #[arg(long)]
        no_delay: bool,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Nama tanaman
    #[arg(short = 'n', long = "name")]
    pub name: String,
    /// Jenis tanaman (padi, jagung, cabai, ...)
    #[arg(short = 't', long = "type", default_value = "lainnya")]
    pub plant_type: String,
    /// Tanggal tanam (YYYY-MM-DD), default hari ini
    #[arg(long)]
    pub planting_date: Option<NaiveDate>,
    /// Perkiraan tanggal panen (YYYY-MM-DD), default 60 hari setelah tanam
    #[arg(long)]
    pub harvest_date: Option<NaiveDate>,
    /// Jadwal siram dalam hari
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..))]
    pub watering_schedule: i64,
    /// Jadwal pupuk dalam hari
    #[arg(long, default_value_t = 14, value_parser = clap::value_parser!(i64).range(1..))]
    pub fertilizing_schedule: i64,
    /// Catatan
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// ID tanaman yang diubah
    #[arg(long)]
    pub id: i64,
    /// Nama baru
    #[arg(short, long)]
    pub name: Option<String>,
    /// Jenis baru
    #[arg(short = 't', long = "type")]
    pub plant_type: Option<String>,
    /// Tanggal tanam baru
    #[arg(long)]
    pub planting_date: Option<NaiveDate>,
    /// Tanggal panen baru
    #[arg(long)]
    pub harvest_date: Option<NaiveDate>,
    /// Jadwal siram baru dalam hari
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    pub watering_schedule: Option<i64>,
    /// Jadwal pupuk baru dalam hari
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    pub fertilizing_schedule: Option<i64>,
    /// Catatan baru
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args, Debug)]
pub struct CalendarArgs {
    /// Tahun, default tahun ini
    #[arg(long)]
    pub year: Option<i32>,
    /// Bulan 1-12, default bulan ini
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
    /// Geser bulan yang ditampilkan, mis. -1 untuk bulan sebelumnya
    #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
    pub shift: i32,
}
